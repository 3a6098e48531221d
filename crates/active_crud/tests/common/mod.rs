#![allow(dead_code)]

use active_crud::db::{open_db_in_memory, Migration};
use active_crud::{Model, RecordId, ValidationErrors};
use rusqlite::types::Value;
use rusqlite::{Connection, Row};

pub const MIGRATIONS: &[Migration] = &[
    Migration::new(
        1,
        "CREATE TABLE articles (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            body TEXT NOT NULL DEFAULT '',
            author TEXT,
            views INTEGER NOT NULL DEFAULT 0
        );",
    ),
    Migration::new(
        2,
        "CREATE TABLE people (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            email TEXT NOT NULL
        );",
    ),
];

pub fn open() -> Connection {
    open_db_in_memory(MIGRATIONS).unwrap()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Article {
    pub id: Option<RecordId>,
    pub title: String,
    pub body: String,
    pub author: Option<String>,
    pub views: i64,
}

#[derive(Debug, Clone, Default)]
pub struct ArticleParams {
    pub title: Option<String>,
    pub body: Option<String>,
    pub author: Option<String>,
    pub views: Option<i64>,
}

impl ArticleParams {
    pub fn titled(title: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            ..Self::default()
        }
    }

    pub fn with_body(mut self, body: &str) -> Self {
        self.body = Some(body.to_string());
        self
    }

    pub fn with_author(mut self, author: &str) -> Self {
        self.author = Some(author.to_string());
        self
    }

    pub fn with_views(mut self, views: i64) -> Self {
        self.views = Some(views);
        self
    }
}

impl Model for Article {
    type Params = ArticleParams;
    const NAME: &'static str = "Article";

    fn columns() -> &'static [&'static str] {
        &["title", "body", "author", "views"]
    }

    fn id(&self) -> Option<RecordId> {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }

    fn assign(&mut self, params: ArticleParams) {
        if let Some(title) = params.title {
            self.title = title;
        }
        if let Some(body) = params.body {
            self.body = body;
        }
        if let Some(author) = params.author {
            self.author = Some(author);
        }
        if let Some(views) = params.views {
            self.views = views;
        }
    }

    fn validate(&self, errors: &mut ValidationErrors) {
        errors.require_present("title", &self.title);
        errors.require_max_length("title", &self.title, 80);
        if self.views < 0 {
            errors.add("views", "must be greater than or equal to 0");
        }
    }

    fn to_values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.title.clone()),
            Value::Text(self.body.clone()),
            self.author.clone().map_or(Value::Null, Value::Text),
            Value::Integer(self.views),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            title: row.get("title")?,
            body: row.get("body")?,
            author: row.get("author")?,
            views: row.get("views")?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Person {
    pub id: Option<RecordId>,
    pub name: String,
    pub email: String,
}

impl Model for Person {
    type Params = (String, String);
    const NAME: &'static str = "Person";

    fn columns() -> &'static [&'static str] {
        &["name", "email"]
    }

    fn id(&self) -> Option<RecordId> {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }

    fn assign(&mut self, (name, email): (String, String)) {
        self.name = name;
        self.email = email;
    }

    fn validate(&self, errors: &mut ValidationErrors) {
        errors.require_present("name", &self.name);
        if !self.email.contains('@') {
            errors.add("email", "is invalid");
        }
    }

    fn to_values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.name.clone()),
            Value::Text(self.email.clone()),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            email: row.get("email")?,
        })
    }
}

pub fn person(name: &str, email: &str) -> (String, String) {
    (name.to_string(), email.to_string())
}
