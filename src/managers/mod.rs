// Destiny Dice state managers
// Managers own in-memory state and persist it through the destiny store.

pub mod destiny_list;
pub mod destiny_manager;
