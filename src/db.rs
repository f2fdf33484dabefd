pub mod context;
pub mod provision;

pub mod user_repo;
pub use user_repo::UserRepository;
pub mod building_repo;
pub use building_repo::BuildingRepository;
pub mod apartment_repo;
pub use apartment_repo::ApartmentRepository;
pub mod resident_repo;
pub use resident_repo::ResidentRepository;
pub mod bill_repo;
pub use bill_repo::BillRepository;
pub mod payment_repo;
pub use payment_repo::PaymentRepository;
pub mod service_request_repo;
pub use service_request_repo::ServiceRequestRepository;
pub mod dashboard_repo;
pub use dashboard_repo::DashboardRepository;

#[cfg(test)]
pub(crate) mod test_support;

pub use context::{ContextFactory, DbContext, SchemaName, SchemaSelector, UserSelectors};
