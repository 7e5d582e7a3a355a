use std::any::Any;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TrackRef(String);

impl TrackRef {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn scheme(&self) -> &str {
        self.0.split_once(':').map(|(scheme, _)| scheme).unwrap_or("")
    }
}

impl fmt::Display for TrackRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TrackRef {
    fn from(reference: &str) -> Self {
        Self::new(reference)
    }
}

impl From<String> for TrackRef {
    fn from(reference: String) -> Self {
        Self(reference)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackInfo {
    pub title: String,
    pub source: String,
}

pub struct StreamHandle(Box<dyn Any + Send>);

impl StreamHandle {
    pub fn new<T: Any + Send>(inner: T) -> Self {
        Self(Box::new(inner))
    }

    pub fn downcast<T: Any + Send>(self) -> Result<Box<T>, Self> {
        self.0.downcast::<T>().map_err(Self)
    }
}

impl fmt::Debug for StreamHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StreamHandle(..)")
    }
}

#[derive(Debug)]
pub struct ResolvedTrack {
    pub stream: StreamHandle,
    pub info: TrackInfo,
}
