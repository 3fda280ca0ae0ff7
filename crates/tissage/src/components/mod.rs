//! Ready-made markup for common UI patterns, built on the framework
//! stylesheet's class names.

pub mod forms;
pub mod layouts;
pub mod ui;
pub mod widgets;
