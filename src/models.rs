pub mod definitions;
pub mod inventory;
pub mod profile;
pub mod sockets;
pub mod types;
