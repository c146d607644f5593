//! Resolution of backend-supplied image paths.

const ABSOLUTE_PREFIXES: &[&str] = &["http://", "https://", "data:", "blob:"];

fn is_absolute(path: &str) -> bool {
    ABSOLUTE_PREFIXES.iter().any(|prefix| {
        path.get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    })
}

/// Turn an image path from the backend into a URL the browser can load.
///
/// Absent or blank paths yield `None`. Absolute URLs are returned unchanged;
/// anything else is joined to `origin` with exactly one `/` between them.
#[must_use]
pub fn resolve_image_url(origin: &str, path: Option<&str>) -> Option<String> {
    let path = path?.trim();
    if path.is_empty() {
        return None;
    }
    if is_absolute(path) {
        return Some(path.to_string());
    }
    let origin = origin.trim_end_matches('/');
    let rel = path.trim_start_matches('/');
    Some(format!("{origin}/{rel}"))
}

#[cfg(test)]
mod tests {
    use super::resolve_image_url;

    const ORIGINS: [&str; 3] = [
        "http://127.0.0.1:5000",
        "http://127.0.0.1:5000/",
        "https://forja.example///",
    ];

    #[test]
    fn absolute_urls_pass_through_for_every_origin() {
        for origin in ORIGINS {
            for url in [
                "http://cdn.example/elfo.png",
                "https://cdn.example/a/b.png",
                "HTTPS://CDN.EXAMPLE/X.PNG",
                "data:image/png;base64,AAAA",
            ] {
                assert_eq!(resolve_image_url(origin, Some(url)).as_deref(), Some(url));
            }
        }
    }

    #[test]
    fn relative_paths_get_exactly_one_separator() {
        for origin in ORIGINS {
            for path in [
                "images/characters/elfo.png",
                "/images/characters/elfo.png",
                "///images/characters/elfo.png",
            ] {
                let url = resolve_image_url(origin, Some(path)).expect("resolved");
                let (base, rest) = url.split_once("//").expect("scheme");
                assert!(rest.ends_with("/images/characters/elfo.png"), "{url}");
                assert!(!rest.contains("//"), "double slash in {url}");
                assert!(base.starts_with("http"));
            }
        }
    }

    #[test]
    fn leading_double_slash_is_a_relative_path() {
        assert_eq!(
            resolve_image_url("http://127.0.0.1:5000", Some("//images/x.png")).as_deref(),
            Some("http://127.0.0.1:5000/images/x.png")
        );
        assert_eq!(
            resolve_image_url("http://127.0.0.1:5000/", Some("//cdn.example/orco.png")).as_deref(),
            Some("http://127.0.0.1:5000/cdn.example/orco.png")
        );
    }

    #[test]
    fn absent_or_blank_paths_resolve_to_none() {
        for origin in ORIGINS {
            assert_eq!(resolve_image_url(origin, None), None);
            assert_eq!(resolve_image_url(origin, Some("")), None);
            assert_eq!(resolve_image_url(origin, Some("   ")), None);
        }
    }

    #[test]
    fn resolution_is_deterministic() {
        let a = resolve_image_url(ORIGINS[0], Some("img/x.png"));
        let b = resolve_image_url(ORIGINS[0], Some("img/x.png"));
        assert_eq!(a, b);
        assert_eq!(a.as_deref(), Some("http://127.0.0.1:5000/img/x.png"));
    }
}
