//! Outcomes of the routing pipeline.

/// Redirect status codes the policy emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectStatus {
    /// 301
    MovedPermanently,
    /// 302
    Found,
    /// 308, method-preserving
    PermanentRedirect,
}

impl RedirectStatus {
    pub fn code(self) -> u16 {
        match self {
            RedirectStatus::MovedPermanently => 301,
            RedirectStatus::Found => 302,
            RedirectStatus::PermanentRedirect => 308,
        }
    }
}

/// Static error pages the edge renders itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPage {
    NotFound,
    Forbidden,
}

impl ErrorPage {
    pub fn code(self) -> u16 {
        match self {
            ErrorPage::NotFound => 404,
            ErrorPage::Forbidden => 403,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ErrorPage::NotFound => "Not Found",
            ErrorPage::Forbidden => "Forbidden",
        }
    }
}

/// What to do with one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutingDecision {
    /// Hand the request to the application router.
    PassThrough,
    Redirect {
        location: String,
        status: RedirectStatus,
    },
    /// Answer with an error page without routing further.
    Forbidden { page: ErrorPage },
}

impl RoutingDecision {
    pub(crate) fn redirect(location: String, status: RedirectStatus) -> Self {
        RoutingDecision::Redirect { location, status }
    }

    pub(crate) fn forbidden() -> Self {
        RoutingDecision::Forbidden {
            page: ErrorPage::Forbidden,
        }
    }

    pub fn is_pass_through(&self) -> bool {
        matches!(self, RoutingDecision::PassThrough)
    }

    /// Status code sent for this decision, if it answers the request itself.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            RoutingDecision::PassThrough => None,
            RoutingDecision::Redirect { status, .. } => Some(status.code()),
            RoutingDecision::Forbidden { page } => Some(page.code()),
        }
    }
}
