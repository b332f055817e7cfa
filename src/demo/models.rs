//! Queries, commands and records of the contacts API.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::shape::{FieldTable, Shape};

#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AddNumbersQuery {
    pub number1: i64,
    pub number2: i64,
}

impl Shape for AddNumbersQuery {
    fn fields(table: &mut FieldTable<Self>) {
        table.integer("number1", |q, v: i64| q.number1 = v);
        table.integer("number2", |q, v: i64| q.number2 = v);
    }
}

/// Arithmetic operator of `/calculate/{operator}`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    #[default]
    Plus,
    Minus,
    Times,
    Divide,
}

impl Operator {
    pub const NAMES: &'static [&'static str] = &["plus", "minus", "times", "divide"];
}

impl FromStr for Operator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "plus" => Ok(Operator::Plus),
            "minus" => Ok(Operator::Minus),
            "times" => Ok(Operator::Times),
            "divide" => Ok(Operator::Divide),
            other => Err(format!("unknown operator `{other}`")),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operator::Plus => "plus",
            Operator::Minus => "minus",
            Operator::Times => "times",
            Operator::Divide => "divide",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CalculateQuery {
    pub operator: Operator,
    pub number1: i64,
    pub number2: i64,
}

impl Shape for CalculateQuery {
    fn fields(table: &mut FieldTable<Self>) {
        table.enumeration("operator", Operator::NAMES, |q, v: Operator| q.operator = v);
        table.integer("number1", |q, v: i64| q.number1 = v);
        table.integer("number2", |q, v: i64| q.number2 = v);
    }
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
pub struct GetContactsQuery {}

impl Shape for GetContactsQuery {}

#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchContactsQuery {
    pub value: String,
}

impl Shape for SearchContactsQuery {
    fn fields(table: &mut FieldTable<Self>) {
        table.string("value", |q, v| q.value = v);
    }
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GetContactByIdQuery {
    pub id: i64,
}

impl Shape for GetContactByIdQuery {
    fn fields(table: &mut FieldTable<Self>) {
        table.integer("id", |q, v: i64| q.id = v);
    }
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateContactCommand {
    pub name: String,
}

impl Shape for CreateContactCommand {
    fn fields(table: &mut FieldTable<Self>) {
        table.string("name", |c, v| c.name = v).required();
    }
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateContactCommand {
    pub id: i64,
    pub name: String,
}

impl Shape for UpdateContactCommand {
    fn fields(table: &mut FieldTable<Self>) {
        table.integer("id", |c, v: i64| c.id = v);
        table.string("name", |c, v| c.name = v).required();
    }
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeleteContactCommand {
    pub id: i64,
}

impl Shape for DeleteContactCommand {
    fn fields(table: &mut FieldTable<Self>) {
        table.integer("id", |c, v: i64| c.id = v);
    }
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeleteContactBySearchCommand {
    pub value: String,
}

impl Shape for DeleteContactBySearchCommand {
    fn fields(table: &mut FieldTable<Self>) {
        table.string("value", |c, v| c.value = v);
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: i64,
    pub name: String,
}

impl Shape for Contact {
    fn fields(table: &mut FieldTable<Self>) {
        table.integer("id", |c, v: i64| c.id = v);
        table.string("name", |c, v| c.name = v);
    }
}
