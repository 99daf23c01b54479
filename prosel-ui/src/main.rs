//! Prosel Dashboard
//!
//! Hospital operations dashboard built with Leptos (WASM).
//!
//! # Features
//!
//! - Sign-in and sign-up with per-field validation
//! - Transport scheduling, patient tracking, priority management and
//!   incident logging panels
//! - Toast notifications
//!
//! # Architecture
//!
//! Client-side rendered (CSR) Leptos application. Panels, forms and the
//! session guard come from the `prosel` core; this crate supplies the
//! browser transport (`gloo-net`), `localStorage` persistence and views.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
