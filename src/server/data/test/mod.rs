mod application;
mod branch;
mod customer;
mod employee;
mod item;
mod loan;
mod payment;
mod role;
mod transaction;
mod user;
