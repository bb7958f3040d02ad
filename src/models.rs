use crate::schema::members;
use crate::schema::questions;
use crate::schema::standups;
use crate::schema::teams;
use chrono::{NaiveDateTime, NaiveTime, Utc};
use diesel::prelude::*;
use serde::Serialize;

#[derive(Debug, Queryable, Serialize)]
pub struct Team {
    pub id: i32,
    pub name: String,
    pub timezone: String,
    pub schedule: Option<String>,
    pub slack_channel_id: Option<String>,
}

#[derive(Insertable)]
#[diesel(table_name = teams)]
pub struct NewTeam<'a> {
    pub name: &'a str,
    pub timezone: &'a str,
    pub schedule: Option<&'a str>,
}

#[derive(Debug, Queryable, Serialize)]
pub struct Member {
    pub id: i32,
    pub name: String,
    pub slack_id: String,
    pub team_id: i32,
}

#[derive(Insertable)]
#[diesel(table_name = members)]
pub struct NewMember<'a> {
    pub name: &'a str,
    pub slack_id: &'a str,
    pub team_id: i32,
}

#[derive(Debug, Queryable, Serialize)]
pub struct Question {
    pub id: i32,
    pub team_id: i32,
    pub text: String,
    pub answer: serde_json::Value,
}

#[derive(Insertable)]
#[diesel(table_name = questions)]
pub struct NewQuestion<'a> {
    pub team_id: i32,
    pub text: &'a str,
    pub answer: serde_json::Value,
}

#[derive(Debug, Queryable, Serialize)]
pub struct Standup {
    pub id: i32,
    pub team_id: i32,
    pub member_id: i32,
    pub date: NaiveDateTime,
    pub answers: serde_json::Value,
}

#[derive(Insertable)]
#[diesel(table_name = standups)]
pub struct NewStandup {
    pub team_id: i32,
    pub member_id: i32,
    pub date: NaiveDateTime,
    pub answers: serde_json::Value,
}

impl NewStandup {
    // one standup per member per day, so the date is pinned to midnight
    pub fn new(team_id: i32, member_id: i32, answers: serde_json::Value) -> NewStandup {
        let today = Utc::now().date_naive().and_time(NaiveTime::MIN);

        NewStandup {
            team_id,
            member_id,
            date: today,
            answers,
        }
    }
}
