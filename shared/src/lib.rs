use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Suit of a standard playing card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Suit {
    Spades,
    Hearts,
    Diamonds,
    Clubs,
}

impl Suit {
    /// Unicode suit symbol, the canonical text form ("♠", "♥", "♦", "♣").
    pub fn symbol(&self) -> char {
        match self {
            Suit::Spades => '♠',
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
            Suit::Clubs => '♣',
        }
    }

    /// ASCII suit letter ("S", "H", "D", "C").
    pub fn letter(&self) -> char {
        match self {
            Suit::Spades => 'S',
            Suit::Hearts => 'H',
            Suit::Diamonds => 'D',
            Suit::Clubs => 'C',
        }
    }

    /// Accepts both the symbol and the letter notation.
    pub fn from_char(c: char) -> Option<Suit> {
        match c {
            '♠' | 'S' | 's' => Some(Suit::Spades),
            '♥' | 'H' | 'h' => Some(Suit::Hearts),
            '♦' | 'D' | 'd' => Some(Suit::Diamonds),
            '♣' | 'C' | 'c' => Some(Suit::Clubs),
            _ => None,
        }
    }

    /// Full suit name for display ("Spades", "Hearts", ...).
    pub fn name(&self) -> &'static str {
        match self {
            Suit::Spades => "Spades",
            Suit::Hearts => "Hearts",
            Suit::Diamonds => "Diamonds",
            Suit::Clubs => "Clubs",
        }
    }
}

/// Rank of a standard playing card, Ace through King.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rank {
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

impl Rank {
    /// Rank token as it appears in card identifiers ("A", "2".."10", "J", "Q", "K").
    pub fn token(&self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
        }
    }

    /// Parse a rank token, case-insensitive for the letter ranks.
    pub fn from_token(token: &str) -> Option<Rank> {
        match token.to_ascii_uppercase().as_str() {
            "A" => Some(Rank::Ace),
            "2" => Some(Rank::Two),
            "3" => Some(Rank::Three),
            "4" => Some(Rank::Four),
            "5" => Some(Rank::Five),
            "6" => Some(Rank::Six),
            "7" => Some(Rank::Seven),
            "8" => Some(Rank::Eight),
            "9" => Some(Rank::Nine),
            "10" => Some(Rank::Ten),
            "J" => Some(Rank::Jack),
            "Q" => Some(Rank::Queen),
            "K" => Some(Rank::King),
            _ => None,
        }
    }

    /// Full rank name for display ("Ace", "Two", ...).
    pub fn name(&self) -> &'static str {
        match self {
            Rank::Ace => "Ace",
            Rank::Two => "Two",
            Rank::Three => "Three",
            Rank::Four => "Four",
            Rank::Five => "Five",
            Rank::Six => "Six",
            Rank::Seven => "Seven",
            Rank::Eight => "Eight",
            Rank::Nine => "Nine",
            Rank::Ten => "Ten",
            Rank::Jack => "Jack",
            Rank::Queen => "Queen",
            Rank::King => "King",
        }
    }
}

/// Error returned when a card identifier cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CardParseError {
    #[error("empty card identifier")]
    Empty,
    #[error("unrecognized suit in card identifier '{0}'")]
    InvalidSuit(String),
    #[error("unrecognized rank '{0}' in card identifier")]
    InvalidRank(String),
}

/// A standard playing card, the canonical in-memory card representation.
///
/// The two textual notations in circulation (symbol: "5♦", letter: "5D")
/// exist only at the boundary: `parse` accepts either, `Display` and serde
/// emit the symbol notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Parse a card identifier in either notation. Input is trimmed; suit
    /// letters are case-insensitive.
    pub fn parse(input: &str) -> Result<Card, CardParseError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(CardParseError::Empty);
        }

        let mut chars = trimmed.chars();
        let suit_char = chars.next_back().ok_or(CardParseError::Empty)?;
        let suit = Suit::from_char(suit_char)
            .ok_or_else(|| CardParseError::InvalidSuit(trimmed.to_string()))?;

        let rank_token = chars.as_str().trim();
        let rank = Rank::from_token(rank_token)
            .ok_or_else(|| CardParseError::InvalidRank(rank_token.to_string()))?;

        Ok(Card { rank, suit })
    }

    /// Symbol notation, e.g. "5♦".
    pub fn symbol_notation(&self) -> String {
        format!("{}{}", self.rank.token(), self.suit.symbol())
    }

    /// Letter notation, e.g. "5D".
    pub fn letter_notation(&self) -> String {
        format!("{}{}", self.rank.token(), self.suit.letter())
    }

    /// Display name, e.g. "Five of Diamonds".
    pub fn display_name(&self) -> String {
        format!("{} of {}", self.rank.name(), self.suit.name())
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.token(), self.suit.symbol())
    }
}

impl FromStr for Card {
    type Err = CardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Card::parse(s)
    }
}

impl Serialize for Card {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Card::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Represents a child profile in the reading system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Child {
    pub id: String,
    pub name: String,
    pub birthdate: String, // ISO 8601 date format (YYYY-MM-DD)
    pub created_at: String, // RFC 3339 timestamp
    pub updated_at: String, // RFC 3339 timestamp
    /// Soft-delete flag; deleted profiles are kept but hidden
    pub is_active: bool,
}

/// Request for creating a new child profile
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateChildRequest {
    pub name: String,
    pub birthdate: String, // ISO 8601 date format (YYYY-MM-DD)
}

/// Request for updating an existing child profile
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpdateChildRequest {
    pub name: Option<String>,
    pub birthdate: Option<String>, // ISO 8601 date format (YYYY-MM-DD)
}

/// Response after creating or updating a child profile
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChildResponse {
    pub child: Child,
    pub success_message: String,
}

/// Response containing a list of child profiles
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChildListResponse {
    pub children: Vec<Child>,
}

/// Response after soft-deleting a child profile
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeleteChildResponse {
    pub success_message: String,
}

/// Response containing the active child, if one is selected
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActiveChildResponse {
    pub active_child: Option<Child>,
}

/// Response for a birth card lookup
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BirthCardResponse {
    pub card: String,
    pub card_name: String,
}

/// The twelve-card yearly forecast for a birth card at a given age.
/// Fields are None where the underlying table cell was blank.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct YearlyForecast {
    pub birth_card: String,
    pub age: u32,
    pub mercury: Option<String>,
    pub venus: Option<String>,
    pub mars: Option<String>,
    pub jupiter: Option<String>,
    pub saturn: Option<String>,
    pub uranus: Option<String>,
    pub neptune: Option<String>,
    pub long_range: Option<String>,
    pub pluto: Option<String>,
    pub result: Option<String>,
    pub support: Option<String>,
    pub development: Option<String>,
}

/// One of the seven dated planetary windows within an age-year
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanetaryPeriod {
    pub planet: String,
    pub card: Option<String>,
    pub start_date: String, // ISO 8601 date format (YYYY-MM-DD)
    pub end_date: String,   // ISO 8601 date format (YYYY-MM-DD)
    pub is_current: bool,
}

/// A complete computed reading for a child
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Reading {
    pub id: String,
    pub child_id: String,
    pub birth_card: Option<String>,
    pub card_name: Option<String>,
    pub age: u32,
    pub forecast: Option<YearlyForecast>,
    pub periods: Vec<PlanetaryPeriod>,
    pub computed_at: String, // RFC 3339 timestamp
}

/// Response after saving a reading snapshot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SaveReadingResponse {
    pub reading: Reading,
    pub success_message: String,
}

/// Response containing saved reading snapshots, newest first
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReadingListResponse {
    pub readings: Vec<Reading>,
}
