//! Lookup tables built from resource listings.
//!
//! These are plain values owned by the caller. Nothing is cached behind the
//! scenes, so fetching the same listing twice and rebuilding an index never
//! produces duplicates.

use crate::{Error, FinanceClient, FinancePeriod, Person};
use std::collections::BTreeMap;

/// Persons keyed by their ID.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PersonIndex {
    persons: BTreeMap<u64, Person>,
}

impl PersonIndex {
    pub fn new<I>(persons: I) -> Self
    where
        I: IntoIterator<Item = Person>,
    {
        let mut index = PersonIndex::default();
        index.merge(persons);
        index
    }

    /// Throw away the current contents and index `persons` instead.
    pub fn rebuild<I>(&mut self, persons: I)
    where
        I: IntoIterator<Item = Person>,
    {
        self.persons.clear();
        self.merge(persons);
    }

    /// Add `persons`, replacing any entry with the same ID.
    pub fn merge<I>(&mut self, persons: I)
    where
        I: IntoIterator<Item = Person>,
    {
        for person in persons {
            self.persons.insert(person.id, person);
        }
    }

    pub fn get(&self, id: u64) -> Option<&Person> { self.persons.get(&id) }

    pub fn len(&self) -> usize { self.persons.len() }

    pub fn is_empty(&self) -> bool { self.persons.is_empty() }

    /// Iterate over the persons in ID order.
    pub fn iter(&self) -> impl Iterator<Item = &'_ Person> + '_ {
        self.persons.values()
    }
}

/// Finance clients and their accounting periods, with every period checked
/// to belong to a known client.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FinanceIndex {
    clients: BTreeMap<u64, FinanceClient>,
    periods: BTreeMap<u64, FinancePeriod>,
}

impl FinanceIndex {
    pub fn new<C, P>(clients: C, periods: P) -> Result<Self, Error>
    where
        C: IntoIterator<Item = FinanceClient>,
        P: IntoIterator<Item = FinancePeriod>,
    {
        let clients: BTreeMap<_, _> =
            clients.into_iter().map(|c| (c.id, c)).collect();
        let mut index = FinanceIndex {
            clients,
            periods: BTreeMap::new(),
        };

        for period in periods {
            if !index.clients.contains_key(&period.client_id) {
                return Err(Error::UnknownClient {
                    period_id: period.id,
                    client_id: period.client_id,
                });
            }
            index.periods.insert(period.id, period);
        }

        Ok(index)
    }

    pub fn client(&self, id: u64) -> Option<&FinanceClient> {
        self.clients.get(&id)
    }

    pub fn period(&self, id: u64) -> Option<&FinancePeriod> {
        self.periods.get(&id)
    }

    /// The client that keeps the books for `period`.
    pub fn client_of(&self, period: &FinancePeriod) -> Option<&FinanceClient> {
        self.clients.get(&period.client_id)
    }

    /// Every period belonging to a client, in ID order.
    pub fn periods_of(
        &self,
        client_id: u64,
    ) -> impl Iterator<Item = &'_ FinancePeriod> + '_ {
        self.periods
            .values()
            .filter(move |period| period.client_id == client_id)
    }

    pub fn clients(&self) -> impl Iterator<Item = &'_ FinanceClient> + '_ {
        self.clients.values()
    }

    pub fn periods(&self) -> impl Iterator<Item = &'_ FinancePeriod> + '_ {
        self.periods.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(id: u64, first_name: &str) -> Person {
        Person {
            id,
            first_name: first_name.to_string(),
            ..Person::default()
        }
    }

    fn client(id: u64, name: &str) -> FinanceClient {
        FinanceClient {
            id,
            name: name.to_string(),
            ..FinanceClient::default()
        }
    }

    fn period(id: u64, client_id: u64) -> FinancePeriod {
        FinancePeriod {
            id,
            client_id,
            ..FinancePeriod::default()
        }
    }

    #[test]
    fn merging_the_same_listing_twice_doesnt_duplicate() {
        let listing = vec![person(1, "Martin"), person(2, "Katharina")];
        let mut index = PersonIndex::new(listing.clone());

        index.merge(listing);

        assert_eq!(index.len(), 2);
        assert_eq!(index.get(2).map(|p| p.first_name.as_str()), Some("Katharina"));
    }

    #[test]
    fn merge_replaces_existing_entries() {
        let mut index = PersonIndex::new(vec![person(1, "Martin")]);

        index.merge(vec![person(1, "Martinus")]);

        assert_eq!(index.get(1).map(|p| p.first_name.as_str()), Some("Martinus"));
    }

    #[test]
    fn rebuild_drops_stale_entries() {
        let mut index =
            PersonIndex::new(vec![person(1, "Martin"), person(2, "Katharina")]);

        index.rebuild(vec![person(3, "Philipp")]);

        let ids: Vec<u64> = index.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3]);
    }

    #[test]
    fn periods_are_linked_to_their_client() {
        let index = FinanceIndex::new(
            vec![client(1, "Gemeinde"), client(2, "Förderverein")],
            vec![period(10, 1), period(11, 2), period(12, 1)],
        )
        .unwrap();

        let period = index.period(11).unwrap();
        assert_eq!(
            index.client_of(period).map(|c| c.name.as_str()),
            Some("Förderverein")
        );
        let ids: Vec<u64> = index.periods_of(1).map(|p| p.id).collect();
        assert_eq!(ids, vec![10, 12]);
    }

    #[test]
    fn period_with_an_unknown_client_is_rejected() {
        let got = FinanceIndex::new(
            vec![client(1, "Gemeinde")],
            vec![period(10, 1), period(11, 7)],
        );

        match got {
            Err(Error::UnknownClient {
                period_id,
                client_id,
            }) => {
                assert_eq!(period_id, 11);
                assert_eq!(client_id, 7);
            },
            other => panic!("Unexpected result: {:?}", other),
        }
    }
}
