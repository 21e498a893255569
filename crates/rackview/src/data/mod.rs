pub mod inventory;
pub mod keybindings_data;
pub mod session_data;
pub mod storage;
