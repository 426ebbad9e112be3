//! Common test utilities for ussd-gateway integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum_test::TestServer;
use tempfile::TempDir;
use tokio::sync::mpsc;

use ussd_gateway_core::{Account, CallbackLog, NewAccount, NewCallbackLog, Otp};
use ussd_gateway_service::{create_router, AppState, ServiceConfig, SmsError, SmsNotifier};
use ussd_gateway_store::{RocksStore, Store, StoreError};

/// Phone number used by most tests.
pub const PHONE: &str = "+233241234567";

/// Test harness containing everything needed for integration tests.
pub struct TestHarness {
    /// The test server for making HTTP requests.
    pub server: TestServer,
    /// The store behind the server, for direct inspection.
    pub store: Arc<dyn Store>,
    /// Temporary directory for the database (kept alive for test duration).
    pub _temp_dir: TempDir,
}

impl TestHarness {
    /// Create a new test harness with a fresh database and no SMS provider.
    pub fn new() -> Self {
        Self::build(None)
    }

    /// Create a harness whose SMS notices are captured instead of sent.
    pub fn with_recording_sms() -> (Self, mpsc::UnboundedReceiver<SentSms>) {
        let (notifier, receiver) = RecordingNotifier::new();
        (Self::build(Some(Arc::new(notifier))), receiver)
    }

    fn build(notifier: Option<Arc<dyn SmsNotifier>>) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store: Arc<dyn Store> =
            Arc::new(RocksStore::open(temp_dir.path()).expect("Failed to open store"));

        let server = serve(Arc::clone(&store), notifier);

        Self {
            server,
            store,
            _temp_dir: temp_dir,
        }
    }

    /// Insert an account directly into the store.
    pub fn seed_account(&self, client_id: &str, phone_number: &str, balance: &str) -> Account {
        self.store
            .insert_account(&NewAccount {
                name: "Ama Mensah".into(),
                client_id: client_id.into(),
                phone_number: phone_number.into(),
                balance: balance.parse().expect("Invalid balance"),
            })
            .expect("Failed to seed account")
    }

    /// Post one aggregator callback and return the plain-text reply.
    pub async fn ussd(&self, phone_number: &str, text: &str) -> String {
        let response = self
            .server
            .post("/ussd")
            .form(&[
                ("sessionId", "ATUid_test"),
                ("serviceCode", "*384*123#"),
                ("phoneNumber", phone_number),
                ("text", text),
                ("networkCode", "62001"),
            ])
            .await;

        response.assert_status_ok();
        response.text()
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a test server over an arbitrary store.
pub fn serve(store: Arc<dyn Store>, notifier: Option<Arc<dyn SmsNotifier>>) -> TestServer {
    let config = ServiceConfig {
        listen_addr: "127.0.0.1:0".into(),
        ..ServiceConfig::default()
    };

    let mut state = AppState::new(store, config);
    if let Some(notifier) = notifier {
        state = state.with_sms_notifier(notifier);
    }

    let router: Router = create_router(state);
    TestServer::new(router).expect("Failed to create test server")
}

// ============================================================================
// SMS
// ============================================================================

/// One captured SMS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentSms {
    /// Recipient.
    pub phone_number: String,
    /// Message text.
    pub message: String,
}

/// Notifier that forwards every message to a channel.
pub struct RecordingNotifier {
    sender: mpsc::UnboundedSender<SentSms>,
}

impl RecordingNotifier {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<SentSms>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

#[async_trait]
impl SmsNotifier for RecordingNotifier {
    async fn send(&self, phone_number: &str, message: &str) -> Result<(), SmsError> {
        self.sender
            .send(SentSms {
                phone_number: phone_number.into(),
                message: message.into(),
            })
            .map_err(|e| SmsError::Configuration(e.to_string()))
    }
}

// ============================================================================
// Failing Store
// ============================================================================

/// Store whose every operation fails.
pub struct FailingStore {
    error: fn() -> StoreError,
}

impl FailingStore {
    /// Every call reports a database failure.
    pub fn database() -> Self {
        Self {
            error: || StoreError::Database("connection reset".into()),
        }
    }

    /// Every call reports a write that was not kept.
    pub fn not_persisted() -> Self {
        Self {
            error: || StoreError::NotPersisted { entity: "record" },
        }
    }
}

impl Store for FailingStore {
    fn insert_account(&self, _: &NewAccount) -> ussd_gateway_store::Result<Account> {
        Err((self.error)())
    }

    fn find_account_by_phone(&self, _: &str) -> ussd_gateway_store::Result<Option<Account>> {
        Err((self.error)())
    }

    fn find_account_by_client_id(&self, _: &str) -> ussd_gateway_store::Result<Option<Account>> {
        Err((self.error)())
    }

    fn set_otp(&self, _: &str, _: &Otp) -> ussd_gateway_store::Result<bool> {
        Err((self.error)())
    }

    fn delete_account_by_phone(&self, _: &str) -> ussd_gateway_store::Result<bool> {
        Err((self.error)())
    }

    fn append_callback_log(&self, _: &NewCallbackLog) -> ussd_gateway_store::Result<CallbackLog> {
        Err((self.error)())
    }

    fn list_callback_logs(&self, _: usize, _: usize) -> ussd_gateway_store::Result<Vec<CallbackLog>> {
        Err((self.error)())
    }
}

/// Store that reads normally but never keeps an inserted account.
pub struct LossyInsertStore {
    inner: RocksStore,
    _temp_dir: TempDir,
}

impl LossyInsertStore {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let inner = RocksStore::open(temp_dir.path()).expect("Failed to open store");
        Self {
            inner,
            _temp_dir: temp_dir,
        }
    }
}

impl Store for LossyInsertStore {
    fn insert_account(&self, _: &NewAccount) -> ussd_gateway_store::Result<Account> {
        Err(StoreError::NotPersisted { entity: "account" })
    }

    fn find_account_by_phone(&self, phone: &str) -> ussd_gateway_store::Result<Option<Account>> {
        self.inner.find_account_by_phone(phone)
    }

    fn find_account_by_client_id(&self, id: &str) -> ussd_gateway_store::Result<Option<Account>> {
        self.inner.find_account_by_client_id(id)
    }

    fn set_otp(&self, phone: &str, otp: &Otp) -> ussd_gateway_store::Result<bool> {
        self.inner.set_otp(phone, otp)
    }

    fn delete_account_by_phone(&self, phone: &str) -> ussd_gateway_store::Result<bool> {
        self.inner.delete_account_by_phone(phone)
    }

    fn append_callback_log(&self, e: &NewCallbackLog) -> ussd_gateway_store::Result<CallbackLog> {
        self.inner.append_callback_log(e)
    }

    fn list_callback_logs(&self, l: usize, o: usize) -> ussd_gateway_store::Result<Vec<CallbackLog>> {
        self.inner.list_callback_logs(l, o)
    }
}
