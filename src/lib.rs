//! Vehicle Intake
//!
//! Servicio de entrada de vehículos: registros con matrícula, empleado,
//! contrato y fotos, guardados y consultados por matrícula dentro del
//! namespace de cada sesión.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
