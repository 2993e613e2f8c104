// Task-Modul: Enthält alle Embassy Tasks
//
// Jeder Task läuft asynchron und unabhängig.

pub mod led_demo;

// Re-export Tasks für einfachen Import
pub use led_demo::led_demo_task;
