//! Wire models for every backend resource

pub mod ai;
pub mod application;
pub mod candidate;
pub mod course;
pub mod dashboard;
pub mod hired;
pub mod internship;
pub mod notification;
pub mod settings;
pub mod task;
pub mod unit;

pub use ai::{ContentRequest, GeneratedContent};
pub use application::{Application, ApplicationStatus, NewApplication, OfferDecision};
pub use candidate::CandidateProfile;
pub use course::Course;
pub use dashboard::{CandidateDashboard, UnitDashboard};
pub use hired::HiredCandidate;
pub use internship::{Internship, InternshipFilter, InternshipStatus, InternshipUpdate, NewInternship};
pub use notification::Notification;
pub use settings::{AccountSettings, NotificationSettings, PasswordChange};
pub use task::{CandidateTask, NewTask, TaskStatus};
pub use unit::{Unit, UnitUpdate};
