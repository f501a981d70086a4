pub mod base_url;
pub mod html;
pub mod response_format;
pub mod upload;
