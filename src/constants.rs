use crate::model::address::Address;

/// Fixed page bound per directional query. Histories longer than this are
/// truncated; cursor-following pagination is out of scope.
pub const DEFAULT_TX_QUERY_LIMIT: usize = 50;

pub const ROOT_DISPLAY_WEIGHT: u32 = 10;
pub const PARTICIPANT_DISPLAY_WEIGHT: u32 = 2;

/// Edge value when a transaction fans out to multiple recipients. The
/// per-recipient share is not separable from the available data, so every
/// fan-out edge carries this nominal value.
pub const FAN_OUT_NOMINAL_VALUE: u64 = 1;

/// ======================= System packages =======================
pub const MOVE_STDLIB: Address = Address::from_low_bytes(&[0x01]);
pub const FRAMEWORK: Address = Address::from_low_bytes(&[0x02]);
pub const SYSTEM_STATE: Address = Address::from_low_bytes(&[0x03]);
pub const DENY_LIST: Address = Address::from_low_bytes(&[0x04, 0x03]);
pub const CLOCK: Address = Address::from_low_bytes(&[0x06]);
pub const RANDOMNESS: Address = Address::from_low_bytes(&[0x08]);
pub const DEEPBOOK: Address = Address::from_low_bytes(&[0xde, 0xe9]);

pub const SYSTEM_PACKAGES: [(Address, &str); 7] = [
    (MOVE_STDLIB, "move-stdlib"),
    (FRAMEWORK, "framework"),
    (SYSTEM_STATE, "system-state"),
    (DENY_LIST, "deny-list"),
    (CLOCK, "clock"),
    (RANDOMNESS, "randomness"),
    (DEEPBOOK, "deepbook"),
];

/// Label of a well-known system package, if the address is one. Such
/// participants are graphed as contract nodes instead of wallets.
pub fn system_package_name(address: &Address) -> Option<&'static str> {
    SYSTEM_PACKAGES
        .iter()
        .find(|(package, _)| package == address)
        .map(|(_, name)| *name)
}
