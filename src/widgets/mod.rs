// src/widgets/mod.rs
pub mod scrollable_paragraph;
