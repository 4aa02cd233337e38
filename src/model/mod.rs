/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/
/// Coupon events and coupon row parsing
pub mod coupon;
/// HTTP request utilities with rate limiting and retry
pub mod http;
/// Monthly coupon aggregation and report rows
pub mod report;
/// ISS response tables
pub mod responses;
/// Retry configuration for HTTP requests
pub mod retry;
/// Security records and the lookup normalizer
pub mod security;
