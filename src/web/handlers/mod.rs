pub mod admin;
pub mod auth;
pub mod contact;
pub mod public;

use actix_web::web;

/// Registers every route. Auth routes go before the admin resource routes so that
/// `/admin/login` and friends are never read as a resource name.
pub fn configure(cfg: &mut web::ServiceConfig) {
    public::configure(cfg);
    contact::configure(cfg);
    auth::configure(cfg);
    admin::configure(cfg);
}
