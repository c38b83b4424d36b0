//! Typed services, one per remote resource. Each borrows the client's
//! [`Executor`](crate::Executor) and is obtained from an accessor on
//! [`Client`](crate::Client).

pub mod collaborator;
pub mod cost_center;
pub mod driver;
pub mod employee;
pub mod quote;
pub mod ride;
pub mod role;
pub mod unit;
pub mod webhook;

pub use collaborator::{Collaborator, CollaboratorResponse, CollaboratorService};
pub use cost_center::{CostCenter, CostCenterResponse, CostCenterService};
pub use driver::{DriverLocation, DriverResult, DriverService};
pub use employee::{
    Employee, EmployeeLastRides, EmployeeResult, EmployeeService, EmployeeStatus,
    HistoricalCategory, HistoricalDriver, HistoricalRideInfo, RideHistory,
};
pub use quote::{Category, Estimate, Icon, QuoteResult, QuoteService, SubCategory};
pub use ride::{
    cancelled_by, status, Address, Base, CancellationReasons, Driver, Location, Passenger,
    QrCodeResult, Ride, RideCancel, RideInfo, RideRate, RideResult, RideService, TravelInfo,
    Vehicle,
};
pub use role::{Role, RoleResponse, RoleService};
pub use unit::{Unit, UnitResponse, UnitService};
pub use webhook::{Webhook, WebhookResult, WebhookRide, WebhookService};
