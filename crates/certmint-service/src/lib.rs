// SPDX-License-Identifier: MIT
//
// certmint-service — The three operations the boundary layer calls:
// generate, metadata lookup, and artifact fetch.

pub mod service;

pub use service::CertificateService;
