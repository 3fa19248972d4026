//! Pages
//!
//! One component per screen; each owns the caches it loads.

mod activities;
mod companies;
mod contacts;
mod dashboard;
mod deals;

pub use activities::ActivitiesPage;
pub use companies::CompaniesPage;
pub use contacts::ContactsPage;
pub use dashboard::DashboardPage;
pub use deals::DealsPage;
