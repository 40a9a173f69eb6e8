pub mod dialogs;
pub mod hooks;
pub mod menus;
pub mod sidebar;
pub mod ui;
