//! Network integrations: the CBR rate feed and the VK Teams sender
//!
//! Everything here talks blocking HTTP with bounded timeouts; the core
//! never imports this module directly, it only sees the [`RateFeed`] and
//! [`ReportSender`] seams.
//!
//! [`RateFeed`]: crate::feed::RateFeed
//! [`ReportSender`]: crate::report::ReportSender

pub mod cbr;
pub mod vkteams;

pub use cbr::CbrFeed;
pub use vkteams::VkTeamsSender;
