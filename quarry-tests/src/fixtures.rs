use quarry::{AsValue, Context, Entity, Result, RowLabeled, Value};
use time::{Date, Month};

#[derive(Entity, Debug, Clone, PartialEq)]
#[quarry(name = "players")]
pub struct Player {
    #[quarry(primary_key)]
    pub id: i64,
    pub name: String,
    pub team: Option<String>,
    pub joined: Option<Date>,
}

/// Composite primary key, in a schema.
#[derive(Entity, Debug, Clone, PartialEq)]
#[quarry(schema = "club", primary_key = ("member_id", Self::club_id))]
pub struct Membership {
    pub member_id: i64,
    pub club_id: i64,
    pub role: String,
}

/// Identified by the implicit row identifier.
#[derive(Entity, Debug, Clone, PartialEq)]
pub struct Note {
    #[quarry(row_id)]
    pub rowid: i64,
    pub body: String,
}

/// Has a table but no primary key.
#[derive(Entity, Debug, Clone, PartialEq)]
#[quarry(name = "event_log")]
pub struct EventLog {
    pub kind: String,
    pub payload: Option<String>,
}

/// Aggregate row with no table behind it.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamScore {
    pub team: String,
    pub players: i64,
}

impl Entity for TeamScore {
    fn from_row(row: RowLabeled) -> Result<Self> {
        let column = |name: &str| {
            row.get_column(name)
                .cloned()
                .with_context(|| format!("Column `{}` is missing", name))
        };
        Ok(Self {
            team: String::try_from_value(column("team")?)?,
            players: i64::try_from_value(column("players")?)?,
        })
    }
}

pub fn player(id: i64, name: &str, team: Option<&str>) -> Player {
    Player {
        id,
        name: name.into(),
        team: team.map(Into::into),
        joined: None,
    }
}

pub fn player_row(player: &Player) -> [Value; 4] {
    [
        player.id.as_value(),
        player.name.clone().as_value(),
        player.team.clone().as_value(),
        player.joined.as_value(),
    ]
}

pub fn players() -> Vec<Player> {
    let mut result = vec![
        player(1, "Ada", Some("red")),
        player(2, "Grace", Some("blue")),
        player(3, "Linus", None),
        player(4, "Barbara", Some("red")),
    ];
    result[0].joined = Date::from_calendar_date(2021, Month::March, 14).ok();
    result
}

pub fn players_table() -> crate::MemoryTable {
    crate::MemoryTable::new(
        ["id", "name", "team", "joined"],
        players().iter().map(player_row),
    )
}

pub fn memberships_table() -> crate::MemoryTable {
    crate::MemoryTable::new(
        ["member_id", "club_id", "role"],
        [
            [1i64.as_value(), 10i64.as_value(), "captain".as_value()],
            [1i64.as_value(), 20i64.as_value(), "member".as_value()],
            [2i64.as_value(), 10i64.as_value(), "member".as_value()],
        ],
    )
}
