// src/services/catalog.rs

//! In-memory joke catalogue.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::models::{Joke, JokeId};

/// The jokes acquired for this process.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    jokes: Vec<Joke>,
    acquired_at: Option<DateTime<Utc>>,
}

impl Catalog {
    /// Create a catalogue from an acquisition result.
    pub fn new(jokes: Vec<Joke>) -> Self {
        Self {
            jokes,
            acquired_at: Some(Utc::now()),
        }
    }

    pub fn len(&self) -> usize {
        self.jokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jokes.is_empty()
    }

    pub fn jokes(&self) -> &[Joke] {
        &self.jokes
    }

    /// When the catalogue was last filled, if ever.
    pub fn acquired_at(&self) -> Option<DateTime<Utc>> {
        self.acquired_at
    }

    /// Pick a joke uniformly at random.
    pub fn pick(&self) -> Option<&Joke> {
        self.pick_with(&mut rand::rng())
    }

    /// Pick a joke uniformly at random using the given generator.
    pub fn pick_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Joke> {
        self.jokes.choose(rng)
    }

    /// Identifier lookup, keeping the first joke for repeated texts.
    pub fn index(&self) -> HashMap<&JokeId, &Joke> {
        let mut index = HashMap::with_capacity(self.jokes.len());
        for joke in &self.jokes {
            index.entry(&joke.id).or_insert(joke);
        }
        index
    }
}
