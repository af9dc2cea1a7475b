//! One-shot confirmation messages carried across a redirect in a cookie.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
    response::{IntoResponseParts, ResponseParts},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use base64ct::{Base64UrlUnpadded, Encoding};
use std::convert::Infallible;

const COOKIE: &str = "flash";

/// The pending flash message of the current request, if any.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Flash(pub Option<String>);

impl Flash {
    /// `Set-Cookie` header that queues `message` for the next page view.
    pub fn set(message: &str) -> [(header::HeaderName, String); 1] {
        let value = Base64UrlUnpadded::encode_string(message.as_bytes());
        [(header::SET_COOKIE, Self::cookie(value).to_string())]
    }

    pub fn message(&self) -> Option<&str> {
        self.0.as_deref()
    }

    fn cookie(value: String) -> Cookie<'static> {
        Cookie::build((COOKIE, value))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .build()
    }

    fn decode(value: &str) -> Option<String> {
        let bytes = Base64UrlUnpadded::decode_vec(value).ok()?;
        String::from_utf8(bytes).ok()
    }
}

/// Returning the extracted flash from a handler expires the cookie once its
/// message has been shown.
impl IntoResponseParts for Flash {
    type Error = Infallible;

    fn into_response_parts(self, res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        if self.0.is_none() {
            return Ok(res);
        }
        let mut expired = Self::cookie(String::new());
        expired.make_removal();
        CookieJar::new().add(expired).into_response_parts(res)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Flash
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let message = jar
            .get(COOKIE)
            .map(|cookie| cookie.value())
            .filter(|value| !value.is_empty())
            .and_then(Flash::decode);
        Ok(Flash(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::Request, response::IntoResponse};

    async fn extract(cookie: &str) -> Flash {
        let (mut parts, _) = Request::builder()
            .header(header::COOKIE, cookie)
            .body(())
            .unwrap()
            .into_parts();
        Flash::from_request_parts(&mut parts, &()).await.unwrap()
    }

    #[tokio::test]
    async fn message_survives_cookie_roundtrip() {
        let [(_, set_cookie)] = Flash::set("Record for Soup on 2024-01-02 deleted successfully!");
        let pair = set_cookie.split(';').next().unwrap();
        let flash = extract(&format!("theme=dark; {pair}")).await;
        assert_eq!(
            flash.message(),
            Some("Record for Soup on 2024-01-02 deleted successfully!")
        );
    }

    #[tokio::test]
    async fn cleared_or_garbled_cookie_yields_nothing() {
        assert_eq!(extract("flash=").await, Flash(None));
        assert_eq!(extract("flash=%%%").await, Flash(None));
    }

    #[test]
    fn shown_message_expires_cookie() {
        let res = (Flash(Some("done".into())), "page").into_response();
        let cookie = res.headers().get(header::SET_COOKIE).unwrap();
        assert!(cookie.to_str().unwrap().contains("Max-Age=0"));

        let res = (Flash(None), "page").into_response();
        assert!(res.headers().get(header::SET_COOKIE).is_none());
    }
}
