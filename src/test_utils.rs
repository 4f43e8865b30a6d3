use crate::model::{Address, Company, Geo, UserId, UserProfile, UserRecord};
use crate::notify::{Notifier, Toast};
use crate::service::{ServiceError, UserService};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List,
    Create(UserProfile),
    Update(UserRecord),
    Delete(UserId),
}

#[derive(Debug)]
struct MockState {
    users: Vec<UserRecord>,
    failing: bool,
    next_id: UserId,
    server_website: Option<String>,
    calls: Vec<Call>,
}

/// Scripted stand-in for the remote service. Clones share state, so a test
/// can keep one handle and give another to the code under test.
#[derive(Clone, Debug)]
pub struct MockUserService {
    state: Arc<Mutex<MockState>>,
}

impl MockUserService {
    pub fn new(users: Vec<UserRecord>) -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState {
                users,
                failing: false,
                next_id: 11,
                server_website: None,
                calls: Vec::new(),
            })),
        }
    }

    /// Every request fails with a 500.
    pub fn failing(self) -> Self {
        self.set_failing(true);
        self
    }

    pub fn set_failing(&self, failing: bool) {
        self.state.lock().expect("mock lock").failing = failing;
    }

    /// Id handed out by the next create.
    pub fn with_next_id(self, id: UserId) -> Self {
        self.state.lock().expect("mock lock").next_id = id;
        self
    }

    /// Make update responses differ from the submitted record.
    pub fn with_server_website(self, website: &str) -> Self {
        self.state.lock().expect("mock lock").server_website = Some(website.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().expect("mock lock").calls.clone()
    }

    fn record(&self, call: Call) -> Result<(), ServiceError> {
        let mut state = self.state.lock().expect("mock lock");
        state.calls.push(call);
        if state.failing {
            return Err(ServiceError::Status {
                status: 500,
                body: "mock failure".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl UserService for MockUserService {
    async fn list_users(&self) -> Result<Vec<UserRecord>, ServiceError> {
        self.record(Call::List)?;
        Ok(self.state.lock().expect("mock lock").users.clone())
    }

    async fn create_user(&self, profile: &UserProfile) -> Result<UserRecord, ServiceError> {
        self.record(Call::Create(profile.clone()))?;
        let id = self.state.lock().expect("mock lock").next_id;
        Ok(UserRecord::new(id, profile.clone()))
    }

    async fn update_user(&self, user: &UserRecord) -> Result<UserRecord, ServiceError> {
        self.record(Call::Update(user.clone()))?;
        let mut accepted = user.clone();
        if let Some(website) = &self.state.lock().expect("mock lock").server_website {
            accepted.profile.website = website.clone();
        }
        Ok(accepted)
    }

    async fn delete_user(&self, id: UserId) -> Result<(), ServiceError> {
        self.record(Call::Delete(id))
    }
}

#[derive(Clone, Debug, Default)]
pub struct RecordingNotifier {
    toasts: Arc<Mutex<Vec<Toast>>>,
    events: Arc<Mutex<Vec<(String, Value)>>>,
}

impl RecordingNotifier {
    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.lock().expect("toasts lock").clone()
    }

    pub fn last_toast(&self) -> Option<Toast> {
        self.toasts.lock().expect("toasts lock").last().cloned()
    }

    pub fn events(&self) -> Vec<(String, Value)> {
        self.events.lock().expect("events lock").clone()
    }

    pub fn has_event(&self, event_type: &str) -> bool {
        self.events().iter().any(|(t, _)| t == event_type)
    }
}

impl Notifier for RecordingNotifier {
    fn toast(&self, toast: Toast) {
        self.toasts.lock().expect("toasts lock").push(toast);
    }

    fn event(&self, event_type: &str, data: Value) {
        self.events
            .lock()
            .expect("events lock")
            .push((event_type.to_string(), data));
    }
}

pub fn leanne_json() -> Value {
    serde_json::json!({
        "id": 1,
        "name": "Leanne Graham",
        "username": "Bret",
        "email": "Sincere@april.biz",
        "address": {
            "street": "Kulas Light",
            "suite": "Apt. 556",
            "city": "Gwenborough",
            "zipcode": "92998-3874",
            "geo": { "lat": "-37.3159", "lng": "81.1496" }
        },
        "phone": "1-770-736-8031 x56442",
        "website": "hildegard.org",
        "company": {
            "name": "Romaguera-Crona",
            "catchPhrase": "Multi-layered client-server neural-net",
            "bs": "harness real-time e-markets"
        }
    })
}

pub fn leanne() -> UserRecord {
    UserRecord::new(
        1,
        UserProfile {
            name: "Leanne Graham".to_string(),
            username: "Bret".to_string(),
            email: "Sincere@april.biz".to_string(),
            phone: "1-770-736-8031 x56442".to_string(),
            website: "hildegard.org".to_string(),
            address: Address {
                street: "Kulas Light".to_string(),
                suite: "Apt. 556".to_string(),
                city: "Gwenborough".to_string(),
                zipcode: "92998-3874".to_string(),
                geo: Some(Geo {
                    lat: "-37.3159".to_string(),
                    lng: "81.1496".to_string(),
                }),
            },
            company: Company {
                name: "Romaguera-Crona".to_string(),
                catch_phrase: Some("Multi-layered client-server neural-net".to_string()),
                bs: Some("harness real-time e-markets".to_string()),
            },
        },
    )
}

pub fn ervin() -> UserRecord {
    UserRecord::new(
        2,
        UserProfile {
            name: "Ervin Howell".to_string(),
            username: "Antonette".to_string(),
            email: "Shanna@melissa.tv".to_string(),
            phone: "010-692-6593 x09125".to_string(),
            website: "anastasia.net".to_string(),
            address: Address {
                street: "Victor Plains".to_string(),
                suite: "Suite 879".to_string(),
                city: "Wisokyburgh".to_string(),
                zipcode: "90566-7771".to_string(),
                geo: None,
            },
            company: Company::named("Deckow-Crist"),
        },
    )
}

pub fn clementine() -> UserRecord {
    UserRecord::new(
        3,
        UserProfile {
            name: "Clementine Bauch".to_string(),
            username: "Samantha".to_string(),
            email: "Nathan@yesenia.net".to_string(),
            phone: "1-463-123-4447".to_string(),
            website: "ramiro.info".to_string(),
            address: Address {
                street: "Douglas Extension".to_string(),
                suite: "Suite 847".to_string(),
                city: "McKenziehaven".to_string(),
                zipcode: "59590-4157".to_string(),
                geo: None,
            },
            company: Company::named("Romaguera-Jacobson"),
        },
    )
}
