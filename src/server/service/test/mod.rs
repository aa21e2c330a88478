mod application;
mod auth;
mod branch;
mod collateral;
mod customer;
mod employee;
mod inventory;
mod loan;
mod payment;
mod permission;
mod report;
mod role;
mod transaction;
mod user;
