pub mod company;
pub mod domain;

pub use company::clean_company_name;
pub use domain::{clean_domain, find_website_column};
