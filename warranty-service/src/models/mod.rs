pub mod brand;
pub mod company;
pub mod end_user;
pub mod product;
pub mod session;
pub mod warranty;

pub use brand::Brand;
pub use company::{Company, CompanyStatus};
pub use end_user::EndUser;
pub use product::Product;
pub use session::Session;
pub use warranty::{Warranty, WarrantyStatus};
