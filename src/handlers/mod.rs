pub mod api;
mod html;
pub mod pages;
