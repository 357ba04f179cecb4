//! In-memory backend used by the controller tests.

use std::sync::Mutex;

use async_trait::async_trait;
use secrecy::SecretString;

use stitchhouse_api::{
    ApiError, AuthUser, CatalogBackend, ContactMessage, EmbroideryRequest, LocalFile,
    LogoBrief, LogoDesignFilters, RequestBackend, Session,
};
use stitchhouse_core::{CatalogItem, Price, Role};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Products(u32),
    LogoDesigns(String),
    Embroidery(Box<EmbroideryRequest>),
    LogoBrief(Box<LogoBrief>),
    Contact(Box<ContactMessage>),
}

#[derive(Default)]
pub struct FakeBackend {
    pub items: Vec<CatalogItem>,
    pub fail_with: Option<ApiError>,
    pub reply: Option<String>,
    pub calls: Mutex<Vec<Call>>,
}

impl FakeBackend {
    pub fn with_items(count: usize) -> Self {
        Self {
            items: (0..count).map(|i| item(&format!("item-{i}"), 100)).collect(),
            ..Self::default()
        }
    }

    pub fn failing(status: u16, message: Option<&str>) -> Self {
        Self {
            fail_with: Some(ApiError::Backend {
                status,
                message: message.map(str::to_string),
            }),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(&self, call: Call) -> Result<(), ApiError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
        match &self.fail_with {
            Some(ApiError::Backend { status, message }) => Err(ApiError::Backend {
                status: *status,
                message: message.clone(),
            }),
            Some(_) => Err(ApiError::Unauthenticated),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl CatalogBackend for FakeBackend {
    async fn products(&self, limit: u32) -> Result<Vec<CatalogItem>, ApiError> {
        self.record(Call::Products(limit))?;
        Ok(self.items.clone())
    }

    async fn logo_designs(
        &self,
        filters: &LogoDesignFilters,
    ) -> Result<Vec<CatalogItem>, ApiError> {
        self.record(Call::LogoDesigns(filters.query_string()))?;
        Ok(self.items.clone())
    }
}

#[async_trait]
impl RequestBackend for FakeBackend {
    async fn submit_embroidery_request(
        &self,
        _session: &Session,
        request: EmbroideryRequest,
    ) -> Result<Option<String>, ApiError> {
        self.record(Call::Embroidery(Box::new(request)))?;
        Ok(self.reply.clone())
    }

    async fn submit_logo_brief(
        &self,
        _session: Option<&Session>,
        brief: LogoBrief,
    ) -> Result<Option<String>, ApiError> {
        self.record(Call::LogoBrief(Box::new(brief)))?;
        Ok(self.reply.clone())
    }

    async fn send_contact(&self, message: ContactMessage) -> Result<Option<String>, ApiError> {
        self.record(Call::Contact(Box::new(message)))?;
        Ok(self.reply.clone())
    }
}

pub fn item(id: &str, dollars: u32) -> CatalogItem {
    CatalogItem {
        id: id.into(),
        title: format!("Design {id}"),
        description: String::new(),
        price: Price::from_dollars(dollars),
        images: vec![format!("https://cdn.test/{id}.png")],
        category: None,
        industry: None,
        rating: None,
    }
}

pub fn session(role: Role) -> Session {
    Session::new(
        SecretString::from("tok_test"),
        AuthUser {
            id: "u1".into(),
            name: "Sam".to_string(),
            email: "sam@hill.cafe".to_string(),
            role,
        },
    )
}

pub fn png(name: &str, len: usize) -> LocalFile {
    LocalFile::new(name, "image/png", vec![0; len])
}
