use std::{path::Path, time::Duration};

use image::DynamicImage;
use reqwest::{Proxy, Url, blocking::Client};

use crate::{
    Connectivity, DEFAULT_IMAGE_NAME, ImageDescriptor, ImageOrigin, ImageSource, LoadedImage,
    TcpProbe,
};

/// Image fetched when no source is configured.
pub const DEFAULT_IMAGE_URL: &str = "https://picsum.photos/1024";

/// Default time allowed for a whole image download.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Reasons an image could not be loaded. Never escapes [`ImageLoader::fetch_image`];
/// exposed for [`ImageLoader::try_fetch`].
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum FetchError {
    /// The URL did not parse.
    #[display("invalid image URL {_0:?}")]
    InvalidUrl(#[error(not(source))] String),
    /// The connectivity probe reported the host unreachable.
    #[display("{_0} is not reachable")]
    Offline(#[error(not(source))] Url),
    /// No HTTP client could be built.
    #[display("HTTP client is unavailable")]
    ClientUnavailable,
    /// The request failed or returned a non-success status.
    #[display("request failed: {_0}")]
    Http(#[from] reqwest::Error),
    /// The bytes could not be read or decoded as an image.
    #[display("image decode failed: {_0}")]
    Image(#[from] image::ImageError),
}

/// Loads images over HTTP or from disk, substituting the default image on any
/// failure.
///
/// Before a download the connectivity probe checks the image host. When the
/// host looks unreachable but requests would go through a proxy, the proxy is
/// probed instead, so proxy-only networks still download.
#[derive(Debug)]
pub struct ImageLoader<C = TcpProbe> {
    connectivity: C,
    client: Option<Client>,
    route: Route,
}

/// How downloads reach the network.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Route {
    /// Through the proxies named by the environment, if any.
    Environment,
    /// Direct connections only.
    Direct,
    /// Every request goes through this proxy.
    Proxy(Url),
}

impl<C: Connectivity> ImageLoader<C> {
    /// Creates a loader with the [`DEFAULT_TIMEOUT`].
    #[must_use]
    pub fn new(connectivity: C) -> Self {
        Self::with_timeout(connectivity, DEFAULT_TIMEOUT)
    }

    /// Creates a loader whose downloads give up after `timeout`.
    ///
    /// Requests use the proxies named by `http_proxy`, `https_proxy` and
    /// `all_proxy` (or their upper-case forms).
    #[must_use]
    pub fn with_timeout(connectivity: C, timeout: Duration) -> Self {
        let client = Client::builder().timeout(timeout).build();
        Self {
            connectivity,
            client: client_or_warn(client),
            route: Route::Environment,
        }
    }

    /// Creates a loader that connects directly, ignoring proxy settings in the
    /// environment.
    #[must_use]
    pub fn direct(connectivity: C, timeout: Duration) -> Self {
        let client = Client::builder().timeout(timeout).no_proxy().build();
        Self {
            connectivity,
            client: client_or_warn(client),
            route: Route::Direct,
        }
    }

    /// Creates a loader that sends every request through `proxy`, ignoring
    /// proxy settings in the environment.
    #[must_use]
    pub fn with_proxy(connectivity: C, timeout: Duration, proxy: Url) -> Self {
        let client = Proxy::all(proxy.as_str())
            .and_then(|p| Client::builder().timeout(timeout).proxy(p).build());
        Self {
            connectivity,
            client: client_or_warn(client),
            route: Route::Proxy(proxy),
        }
    }

    /// Loads the image described by `descriptor`, reporting failures.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] describing why the image could not be loaded.
    pub fn try_fetch(&self, descriptor: &ImageDescriptor) -> Result<LoadedImage, FetchError> {
        match descriptor {
            ImageDescriptor::Url(url) => Ok(LoadedImage {
                image: self.download(url)?,
                origin: ImageOrigin::Remote,
            }),
            ImageDescriptor::File(path) => Ok(LoadedImage {
                image: open(path)?,
                origin: ImageOrigin::File,
            }),
            ImageDescriptor::Default => Ok(LoadedImage::fallback()),
        }
    }

    fn download(&self, url: &str) -> Result<DynamicImage, FetchError> {
        let url = Url::parse(url).map_err(|_| FetchError::InvalidUrl(url.to_owned()))?;
        if !self.is_reachable(&url) {
            return Err(FetchError::Offline(url));
        }
        let client = self.client.as_ref().ok_or(FetchError::ClientUnavailable)?;

        log::debug!("downloading image from {url}");
        let bytes = client.get(url).send()?.error_for_status()?.bytes()?;
        log::debug!("downloaded {} bytes", bytes.len());
        Ok(image::load_from_memory(&bytes)?)
    }

    fn is_reachable(&self, url: &Url) -> bool {
        if self.connectivity.is_reachable(url) {
            return true;
        }
        self.proxy_for(url).is_some_and(|proxy| {
            log::debug!("{url} is not reachable directly, probing proxy {proxy}");
            self.connectivity.is_reachable(&proxy)
        })
    }

    fn proxy_for(&self, url: &Url) -> Option<Url> {
        match &self.route {
            Route::Environment => env_proxy(url.scheme(), |key| std::env::var(key).ok()),
            Route::Direct => None,
            Route::Proxy(proxy) => Some(proxy.clone()),
        }
    }
}

fn client_or_warn(client: reqwest::Result<Client>) -> Option<Client> {
    client
        .inspect_err(|err| {
            log::warn!("cannot build HTTP client, only local images will load: {err}");
        })
        .ok()
}

/// Looks up the proxy for `scheme` the way the HTTP client does: the
/// scheme-specific variable first, then `all_proxy`. A value without a scheme
/// is taken as an HTTP proxy.
fn env_proxy(scheme: &str, var: impl Fn(&str) -> Option<String>) -> Option<Url> {
    let keys = [
        format!("{scheme}_proxy"),
        format!("{}_PROXY", scheme.to_ascii_uppercase()),
        "all_proxy".to_owned(),
        "ALL_PROXY".to_owned(),
    ];
    let value = keys
        .iter()
        .filter_map(|key| var(key))
        .map(|value| value.trim().to_owned())
        .find(|value| !value.is_empty())?;
    if value.contains("://") {
        Url::parse(&value).ok()
    } else {
        Url::parse(&format!("http://{value}")).ok()
    }
}

impl<C: Connectivity> ImageSource for ImageLoader<C> {
    fn fetch_image(&self, descriptor: &ImageDescriptor) -> LoadedImage {
        match self.try_fetch(descriptor) {
            Ok(loaded) => {
                log::info!(
                    "loaded {}x{} image from {descriptor}",
                    loaded.image.width(),
                    loaded.image.height()
                );
                loaded
            }
            Err(err) => {
                log::warn!("cannot load image from {descriptor}, using {DEFAULT_IMAGE_NAME}: {err}");
                LoadedImage::fallback()
            }
        }
    }
}

fn open(path: &Path) -> Result<DynamicImage, FetchError> {
    log::debug!("reading image from {}", path.display());
    Ok(image::open(path)?)
}

#[cfg(test)]
mod tests {
    use std::{
        cell::Cell,
        io::{Cursor, Read as _, Write as _},
        net::TcpListener,
        path::PathBuf,
        thread,
    };

    use image::{ImageFormat, Rgb, RgbImage};

    use super::*;
    use crate::{Offline, default_image};

    #[derive(Default)]
    struct CountingProbe {
        calls: Cell<usize>,
    }

    impl Connectivity for CountingProbe {
        fn is_reachable(&self, _url: &Url) -> bool {
            self.calls.set(self.calls.get() + 1);
            true
        }
    }

    fn sample_png() -> Vec<u8> {
        let image = RgbImage::from_fn(6, 4, |x, y| Rgb([u8::try_from(x * 40).unwrap(), u8::try_from(y * 60).unwrap(), 0]));
        let mut bytes = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(image)
            .write_to(&mut bytes, ImageFormat::Png)
            .unwrap();
        bytes.into_inner()
    }

    // Answers the first HTTP request on a local port with one response, and
    // returns the server's base URL. Connections that close without sending a
    // request, such as reachability probes, are skipped. Also works as a
    // forward proxy, since the request target is ignored.
    fn serve(status: &'static str, body: Vec<u8>) -> Url {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else { continue };
                let mut request = Vec::new();
                let mut buf = [0; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match stream.read(&mut buf) {
                        Ok(0) | Err(_) => break,
                        Ok(n) => request.extend_from_slice(&buf[..n]),
                    }
                }
                if request.is_empty() {
                    continue;
                }
                let header = format!(
                    "HTTP/1.1 {status}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                    body.len()
                );
                let _ = stream.write_all(header.as_bytes());
                let _ = stream.write_all(&body);
                break;
            }
        });
        Url::parse(&format!("http://{addr}/")).unwrap()
    }

    fn serve_once(status: &'static str, body: Vec<u8>) -> String {
        serve(status, body).join("image.png").unwrap().to_string()
    }

    // Loopback requests must not be routed through a proxy from the environment.
    fn local_loader() -> ImageLoader<CountingProbe> {
        ImageLoader::direct(CountingProbe::default(), DEFAULT_TIMEOUT)
    }

    fn temp_file(name: &str, contents: &[u8]) -> PathBuf {
        let path = std::env::temp_dir().join(format!("picswap-{}-{name}", std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    fn is_default(loaded: &LoadedImage) -> bool {
        loaded.origin.is_fallback() && loaded.image.as_bytes() == default_image().as_bytes()
    }

    #[test]
    fn test_offline_skips_request() {
        let loader = ImageLoader::new(Offline);
        let loaded = loader.fetch_image(&ImageDescriptor::default());
        assert!(is_default(&loaded));
        assert!(matches!(
            loader.try_fetch(&ImageDescriptor::default()),
            Err(FetchError::Offline(_))
        ));
    }

    #[test]
    fn test_invalid_url_is_not_probed() {
        let loader = ImageLoader::new(CountingProbe::default());
        let descriptor = ImageDescriptor::Url("not a url".to_owned());
        assert!(is_default(&loader.fetch_image(&descriptor)));
        assert!(matches!(
            loader.try_fetch(&descriptor),
            Err(FetchError::InvalidUrl(_))
        ));
        assert_eq!(loader.connectivity.calls.get(), 0);
    }

    #[test]
    fn test_download_decodes_image() {
        let url = serve_once("200 OK", sample_png());
        let loader = local_loader();
        let loaded = loader.fetch_image(&ImageDescriptor::Url(url));
        assert!(loaded.origin.is_remote());
        assert_eq!((loaded.image.width(), loaded.image.height()), (6, 4));
        assert_eq!(loader.connectivity.calls.get(), 1);
    }

    #[test]
    fn test_undecodable_download_falls_back() {
        let url = serve_once("200 OK", b"definitely not an image".to_vec());
        let loader = local_loader();
        assert!(matches!(
            loader.try_fetch(&ImageDescriptor::Url(url)),
            Err(FetchError::Image(_))
        ));
    }

    #[test]
    fn test_http_error_falls_back() {
        let url = serve_once("404 Not Found", Vec::new());
        let loader = local_loader();
        assert!(is_default(&loader.fetch_image(&ImageDescriptor::Url(url))));
    }

    #[test]
    fn test_download_through_proxy_when_host_is_unreachable() {
        let proxy = serve("200 OK", sample_png());
        let loader = ImageLoader::with_proxy(
            TcpProbe::new(Duration::from_millis(500)),
            DEFAULT_TIMEOUT,
            proxy,
        );
        let descriptor = ImageDescriptor::Url("http://images.picswap.invalid/image.png".to_owned());

        let loaded = loader.try_fetch(&descriptor).unwrap();
        assert!(loaded.origin.is_remote());
        assert_eq!((loaded.image.width(), loaded.image.height()), (6, 4));
    }

    #[test]
    fn test_unreachable_proxy_is_offline() {
        let proxy = Url::parse("http://127.0.0.1:9/").unwrap();
        let loader = ImageLoader::with_proxy(Offline, DEFAULT_TIMEOUT, proxy);
        let descriptor = ImageDescriptor::Url("http://images.picswap.invalid/image.png".to_owned());
        assert!(matches!(
            loader.try_fetch(&descriptor),
            Err(FetchError::Offline(_))
        ));
    }

    fn vars(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |key| {
            pairs
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (*value).to_owned())
        }
    }

    #[test]
    fn test_env_proxy_lookup() {
        assert_eq!(env_proxy("https", vars(&[])), None);
        assert_eq!(
            env_proxy("https", vars(&[("HTTPS_PROXY", "proxy.local:3128")])),
            Some(Url::parse("http://proxy.local:3128").unwrap())
        );
        assert_eq!(
            env_proxy(
                "http",
                vars(&[("ALL_PROXY", "socks5://gw:1080"), ("http_proxy", "http://web:8080")])
            ),
            Some(Url::parse("http://web:8080").unwrap())
        );
        assert_eq!(
            env_proxy("https", vars(&[("http_proxy", "http://web:8080"), ("all_proxy", " ")])),
            None
        );
    }

    #[test]
    fn test_file_roundtrip_and_fallbacks() {
        let loader = ImageLoader::new(Offline);

        let good = temp_file("good.png", &sample_png());
        let loaded = loader.fetch_image(&ImageDescriptor::File(good.clone()));
        assert!(loaded.origin.is_file());
        assert_eq!((loaded.image.width(), loaded.image.height()), (6, 4));

        let bad = temp_file("bad.png", b"garbage");
        assert!(is_default(&loader.fetch_image(&ImageDescriptor::File(bad.clone()))));

        let missing = std::env::temp_dir().join("picswap-does-not-exist.png");
        assert!(is_default(&loader.fetch_image(&ImageDescriptor::File(missing))));

        let _ = std::fs::remove_file(good);
        let _ = std::fs::remove_file(bad);
    }

    #[test]
    fn test_default_descriptor() {
        let loader = ImageLoader::new(CountingProbe::default());
        assert!(is_default(&loader.fetch_image(&ImageDescriptor::Default)));
        assert_eq!(loader.connectivity.calls.get(), 0);
    }
}
