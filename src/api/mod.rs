//! Typed wrapper over the Dog API v2.
//!
//! Every method issues exactly one GET and hands back the buffered
//! [`ApiResponse`] whatever its status. Deciding whether a 404 is a failure is
//! the caller's job; only transport problems surface as `Err`.

pub mod model;

use tracing::instrument;

use crate::config::SuiteConfig;
use crate::errors::Result;
use crate::http::{ApiResponse, Cardinality, Http, RequestContext, RequestDescriptor};

pub const V2_PATH: &str = "/api/v2";
pub const PAGE_NUMBER_PARAM: &str = "page[number]";
pub const PAGE_SIZE_PARAM: &str = "page[size]";
pub const LIMIT_PARAM: &str = "limit";

/// Largest `limit` the facts endpoint honours. Callers are expected to stay
/// within it; the client forwards whatever it is given.
pub const FACTS_MAX_LIMIT: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Breeds,
    Breed(String),
    Facts,
    Groups,
    Group(String),
}

impl Endpoint {
    pub fn path(&self) -> String {
        match self {
            Endpoint::Breeds => format!("{V2_PATH}/breeds"),
            Endpoint::Breed(id) => format!("{V2_PATH}/breeds/{id}"),
            Endpoint::Facts => format!("{V2_PATH}/facts"),
            Endpoint::Groups => format!("{V2_PATH}/groups"),
            Endpoint::Group(id) => format!("{V2_PATH}/groups/{id}"),
        }
    }

    pub fn cardinality(&self) -> Cardinality {
        match self {
            Endpoint::Breeds | Endpoint::Facts | Endpoint::Groups => Cardinality::Collection,
            Endpoint::Breed(_) | Endpoint::Group(_) => Cardinality::Single,
        }
    }

    pub fn request(&self) -> RequestDescriptor {
        RequestDescriptor::get(self.path(), self.cardinality())
    }
}

fn paged(endpoint: Endpoint, page: Option<u32>, size: Option<u32>) -> RequestDescriptor {
    endpoint
        .request()
        .param(PAGE_NUMBER_PARAM, page)
        .param(PAGE_SIZE_PARAM, size)
}

pub fn list_breeds_request(page: Option<u32>, size: Option<u32>) -> RequestDescriptor {
    paged(Endpoint::Breeds, page, size)
}

pub fn list_groups_request(page: Option<u32>, size: Option<u32>) -> RequestDescriptor {
    paged(Endpoint::Groups, page, size)
}

pub fn list_facts_request(limit: Option<u32>) -> RequestDescriptor {
    Endpoint::Facts.request().param(LIMIT_PARAM, limit)
}

#[derive(Debug, Clone)]
pub struct DogApi {
    ctx: RequestContext,
}

impl DogApi {
    pub fn new(ctx: RequestContext) -> Self {
        Self { ctx }
    }

    /// Open a fresh request context from the suite configuration.
    pub fn from_config(cfg: &SuiteConfig) -> Result<Self> {
        Ok(Self::new(Http::from_config(cfg).build()?))
    }

    pub fn context(&self) -> &RequestContext {
        &self.ctx
    }

    // --- Breeds ---

    #[instrument(skip(self))]
    pub async fn list_breeds(&self, page: Option<u32>, size: Option<u32>) -> Result<ApiResponse> {
        self.ctx.execute(&list_breeds_request(page, size)).await
    }

    /// The id is forwarded untouched; malformed ids are the server's problem.
    #[instrument(skip(self))]
    pub async fn get_breed(&self, id: &str) -> Result<ApiResponse> {
        self.ctx.execute(&Endpoint::Breed(id.to_string()).request()).await
    }

    // --- Facts ---

    /// `limit` should not exceed [`FACTS_MAX_LIMIT`].
    #[instrument(skip(self))]
    pub async fn list_facts(&self, limit: Option<u32>) -> Result<ApiResponse> {
        self.ctx.execute(&list_facts_request(limit)).await
    }

    // --- Groups ---

    #[instrument(skip(self))]
    pub async fn list_groups(&self, page: Option<u32>, size: Option<u32>) -> Result<ApiResponse> {
        self.ctx.execute(&list_groups_request(page, size)).await
    }

    #[instrument(skip(self))]
    pub async fn get_group(&self, id: &str) -> Result<ApiResponse> {
        self.ctx.execute(&Endpoint::Group(id.to_string()).request()).await
    }
}
