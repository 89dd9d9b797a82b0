//! One service per backend resource.
//!
//! Every operation goes through [`ApiClient::call`] (or its list/unit
//! variants) with an operation-specific fallback message, so callers get
//! either the decoded payload or a single [`crate::errors::RequestFailed`].

pub mod ai_content;
pub mod applications;
pub mod candidates;
pub mod courses;
pub mod dashboard;
pub mod hired_candidates;
pub mod internships;
pub mod notifications;
pub mod settings;
pub mod tasks;
pub mod units;

use crate::api::ApiClient;

pub use ai_content::AiContentService;
pub use applications::ApplicationService;
pub use candidates::CandidateService;
pub use courses::CourseService;
pub use dashboard::DashboardService;
pub use hired_candidates::HiredCandidateService;
pub use internships::InternshipService;
pub use notifications::NotificationService;
pub use settings::SettingsService;
pub use tasks::TaskService;
pub use units::UnitService;

/// All resource services over one shared client
#[derive(Clone)]
pub struct Services {
    pub internships: InternshipService,
    pub applications: ApplicationService,
    pub units: UnitService,
    pub courses: CourseService,
    pub notifications: NotificationService,
    pub tasks: TaskService,
    pub ai_content: AiContentService,
    pub settings: SettingsService,
    pub hired_candidates: HiredCandidateService,
    pub candidates: CandidateService,
    pub dashboard: DashboardService,
}

impl Services {
    pub fn new(api: ApiClient) -> Self {
        Self {
            internships: InternshipService::new(api.clone()),
            applications: ApplicationService::new(api.clone()),
            units: UnitService::new(api.clone()),
            courses: CourseService::new(api.clone()),
            notifications: NotificationService::new(api.clone()),
            tasks: TaskService::new(api.clone()),
            ai_content: AiContentService::new(api.clone()),
            settings: SettingsService::new(api.clone()),
            hired_candidates: HiredCandidateService::new(api.clone()),
            candidates: CandidateService::new(api.clone()),
            dashboard: DashboardService::new(api),
        }
    }
}
