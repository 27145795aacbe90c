//! User agent and accept headers

/// User agent sent when none is configured
pub fn default_user_agent() -> String {
    format!("dmgmonkey/{}", crate::VERSION)
}

/// Accept header for detail page requests
pub fn accept_html() -> &'static str {
    "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"
}

/// Accept header for index requests
pub fn accept_json() -> &'static str {
    "application/json,text/javascript,*/*;q=0.01"
}
