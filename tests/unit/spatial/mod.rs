pub mod orientation;
