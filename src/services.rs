pub mod auth;
pub mod building_service;
pub mod apartment_service;
pub mod resident_service;
pub mod bill_service;
pub mod payment_service;
pub mod service_request_service;
pub mod dashboard_service;

pub use auth::AuthService;
pub use building_service::BuildingService;
pub use apartment_service::ApartmentService;
pub use resident_service::ResidentService;
pub use bill_service::BillService;
pub use payment_service::PaymentService;
pub use service_request_service::ServiceRequestService;
pub use dashboard_service::DashboardService;

use crate::db::{
    ApartmentRepository, BillRepository, DashboardRepository, DbContext, PaymentRepository,
    ResidentRepository, ServiceRequestRepository,
};

/// Todos os serviços de um prédio, amarrados ao mesmo contexto.
#[derive(Clone)]
pub struct BuildingServices {
    pub apartments: ApartmentService,
    pub residents: ResidentService,
    pub bills: BillService,
    pub payments: PaymentService,
    pub service_requests: ServiceRequestService,
    pub dashboard: DashboardService,
}

impl BuildingServices {
    pub fn new(ctx: DbContext) -> Self {
        Self {
            apartments: ApartmentService::new(ApartmentRepository::new(ctx.clone())),
            residents: ResidentService::new(ResidentRepository::new(ctx.clone())),
            bills: BillService::new(BillRepository::new(ctx.clone())),
            payments: PaymentService::new(PaymentRepository::new(ctx.clone())),
            service_requests: ServiceRequestService::new(ServiceRequestRepository::new(ctx.clone())),
            dashboard: DashboardService::new(DashboardRepository::new(ctx)),
        }
    }
}
