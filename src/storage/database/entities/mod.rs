/// Billing account entity module
pub mod billing_account;
/// Invoice entity module
pub mod invoice;
/// Project entity module
pub mod project;
/// Project member entity module
pub mod project_member;
/// Subscription entity module
pub mod subscription;
/// Transaction entity module
pub mod transaction;
/// User entity module
pub mod user;
/// User session entity module
pub mod user_session;

pub use billing_account::Entity as BillingAccount;
pub use invoice::Entity as Invoice;
pub use project::Entity as Project;
pub use project_member::Entity as ProjectMember;
pub use subscription::Entity as Subscription;
pub use transaction::Entity as Transaction;
pub use user::Entity as User;
pub use user_session::Entity as UserSession;
