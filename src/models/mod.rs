pub mod application;
pub mod job;
pub mod user;

pub use application::{
    ApplicationStatus, CareApplication, FamilyCaregiverApplication, JobApplication,
    NewCareApplication, NewFamilyCaregiverApplication, NewJobApplication,
};
pub use job::{JobPosting, NewJobPosting};
pub use user::{NewUser, User};
