pub mod components;
pub mod date_utils;
pub mod host;
pub mod icons;
