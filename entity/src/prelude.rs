pub use super::application::Entity as Application;
pub use super::branch::Entity as Branch;
pub use super::customer::Entity as Customer;
pub use super::employee::Entity as Employee;
pub use super::employee_type::Entity as EmployeeType;
pub use super::item::Entity as Item;
pub use super::loan::Entity as Loan;
pub use super::payment::Entity as Payment;
pub use super::permission::Entity as Permission;
pub use super::role::Entity as Role;
pub use super::role_permission::Entity as RolePermission;
pub use super::transaction::Entity as Transaction;
pub use super::user::Entity as User;
