pub mod career;
pub mod education;
pub mod veteran;

pub use career::{CareerRecord, SalaryProfile};
pub use education::EducationPath;
pub use veteran::VeteranBaseline;
