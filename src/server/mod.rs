//! Server-side API backend and business logic.
//!
//! This module contains the complete backend for the pawn shop: API endpoints,
//! business rules, data access and infrastructure. It uses Axum as the web framework
//! and SeaORM over Sqlite for persistence.
//!
//! # Architecture
//!
//! The server follows a layered architecture with clear separation of concerns:
//!
//! - **Controller Layer** (`controller/`) - HTTP request handlers, access control, and DTO conversion
//! - **Service Layer** (`service/`) - Business rules and multi-row database transactions
//! - **Data Layer** (`data/`) - Database operations and entity-to-domain model conversion
//! - **Model Layer** (`model/`) - Domain models and operation-specific parameter types
//! - **Error Layer** (`error/`) - Application error types and HTTP response mapping
//! - **Middleware** (`middleware/`) - Permission guards, session access and response timing
//!
//! # Infrastructure
//!
//! - **Configuration** (`config`) - Environment-based application configuration
//! - **State** (`state`) - Shared application state (the database pool)
//! - **Startup** (`startup`) - Database, session store and seed data initialization
//! - **Router** (`router`) - Route table, OpenAPI document, CORS and rate limiting
//! - **Utilities** (`util/`) - Code generation, password hashing, CSV export and dates
//!
//! # Request Flow
//!
//! 1. **Router** receives the HTTP request and routes it to a controller
//! 2. **Middleware** loads the session and checks permissions
//! 3. **Controller** converts DTOs to params and calls a service
//! 4. **Service** applies business rules and orchestrates data operations
//! 5. **Data** queries the database and converts entities to domain models
//! 6. **Controller** converts the domain model to a DTO and returns the response

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod middleware;
pub mod model;
pub mod router;
pub mod service;
pub mod startup;
pub mod state;
pub mod util;
