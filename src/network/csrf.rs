use reqwest::Url;
use reqwest::cookie::{CookieStore, Jar};

pub const CSRF_COOKIE: &str = "csrftoken";

/// Value of cookie `name` that the jar would send to `url`.
pub fn get_cookie(jar: &Jar, url: &Url, name: &str) -> Option<String> {
    let header = jar.cookies(url)?;
    let header = header.to_str().ok()?;
    header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then(|| value.to_string())
    })
}
