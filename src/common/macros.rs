/// Logs a failed operation together with the call site.
///
/// Usage: `log_err!("loading news", &err);` or with extra context that is
/// serialized to JSON: `log_err!("creating staff", &err, &draft);`
#[macro_export]
macro_rules! log_err {
    ($context:expr, $err:expr) => {{
        ::log::error!(
            "{} failed at {}:{}: {}",
            $context,
            file!(),
            line!(),
            $err
        );
    }};
    ($context:expr, $err:expr, $params:expr) => {{
        let params_json = ::serde_json::to_value($params)
            .unwrap_or(::serde_json::Value::Null);

        ::log::error!(
            "{} failed at {}:{}: {} (params: {})",
            $context,
            file!(),
            line!(),
            $err,
            params_json
        );
    }};
}

/// Runs `$body` with the type alias `$r` bound to the model type behind a
/// runtime `ResourceKind`.
#[macro_export]
macro_rules! with_resource {
    ($kind:expr, $r:ident => $body:expr) => {{
        use $crate::models::ResourceKind as __Kind;
        match $kind {
            __Kind::Staff => {
                type $r = $crate::models::Staff;
                $body
            }
            __Kind::News => {
                type $r = $crate::models::NewsItem;
                $body
            }
            __Kind::Events => {
                type $r = $crate::models::Event;
                $body
            }
            __Kind::Gallery => {
                type $r = $crate::models::GalleryImage;
                $body
            }
            __Kind::Testimonials => {
                type $r = $crate::models::Testimonial;
                $body
            }
            __Kind::Stats => {
                type $r = $crate::models::SchoolStat;
                $body
            }
            __Kind::Contact => {
                type $r = $crate::models::ContactMessage;
                $body
            }
            __Kind::Alumni => {
                type $r = $crate::models::Alumnus;
                $body
            }
            __Kind::Kcse => {
                type $r = $crate::models::KcseResult;
                $body
            }
        }
    }};
}
