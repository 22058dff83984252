use protocol_interface::types::error::Error;
use protocol_interface::types::protocol_config::ProtocolConfig;
use protocol_interface::types::sorted_troves::{Node, SortedTrovesData};
use soroban_sdk::{Address, Env};

use crate::storage::{
    has_node, read_node, read_sorted_troves_data, remove_node, write_node,
    write_sorted_troves_data,
};

/// Doubly linked list of troves ordered by descending nominal collateral ratio.
///
/// Ratios are not stored in the list: they change with pending redistribution rewards,
/// so every operation that compares positions takes a `nicr_of` lookup.
/// Hints only shorten the search. A search that visits more than `max_traversal`
/// nodes fails with `Error::HintExhausted`.
pub struct SortedTroves<'a> {
    env: &'a Env,
    data: SortedTrovesData,
    max_size: u32,
    max_traversal: u32,
}

impl<'a> SortedTroves<'a> {
    pub fn new(env: &'a Env, config: &ProtocolConfig) -> Self {
        Self {
            env,
            data: read_sorted_troves_data(env),
            max_size: config.sorted_troves_max_size,
            max_traversal: config.max_hint_traversal,
        }
    }

    pub fn data(&self) -> &SortedTrovesData {
        &self.data
    }

    pub fn size(&self) -> u32 {
        self.data.size
    }

    pub fn is_empty(&self) -> bool {
        self.data.size == 0
    }

    pub fn contains(&self, id: &Address) -> bool {
        has_node(self.env, id)
    }

    /// Trove with the highest ratio
    pub fn first(&self) -> Option<Address> {
        self.data.head.clone()
    }

    /// Trove with the lowest ratio
    pub fn last(&self) -> Option<Address> {
        self.data.tail.clone()
    }

    /// Neighbour towards the tail
    pub fn next(&self, id: &Address) -> Option<Address> {
        read_node(self.env, id).and_then(|node| node.next)
    }

    /// Neighbour towards the head
    pub fn prev(&self, id: &Address) -> Option<Address> {
        read_node(self.env, id).and_then(|node| node.prev)
    }

    pub fn insert<F>(
        &mut self,
        id: &Address,
        nicr: i128,
        prev_id: Option<Address>,
        next_id: Option<Address>,
        nicr_of: &F,
    ) -> Result<(), Error>
    where
        F: Fn(&Address) -> Result<i128, Error>,
    {
        if self.data.size >= self.max_size {
            return Err(Error::ListFull);
        }
        if self.contains(id) {
            return Err(Error::NodeExists);
        }
        if nicr <= 0 {
            return Err(Error::InvalidNicr);
        }

        let (prev, next) = if self.valid_insert_position(nicr, &prev_id, &next_id, nicr_of)? {
            (prev_id, next_id)
        } else {
            self.find_insert_position(nicr, prev_id, next_id, nicr_of)?
        };

        match (&prev, &next) {
            (None, None) => {
                self.data.head = Some(id.clone());
                self.data.tail = Some(id.clone());
            }
            (None, Some(next)) => {
                self.set_prev(next, Some(id.clone()))?;
                self.data.head = Some(id.clone());
            }
            (Some(prev), None) => {
                self.set_next(prev, Some(id.clone()))?;
                self.data.tail = Some(id.clone());
            }
            (Some(prev), Some(next)) => {
                self.set_next(prev, Some(id.clone()))?;
                self.set_prev(next, Some(id.clone()))?;
            }
        }

        write_node(self.env, id, &Node { next, prev });
        self.data.size += 1;
        write_sorted_troves_data(self.env, &self.data);

        Ok(())
    }

    pub fn remove(&mut self, id: &Address) -> Result<(), Error> {
        let node = read_node(self.env, id).ok_or(Error::NodeNotFound)?;

        if self.data.size > 1 {
            match (&node.prev, &node.next) {
                (None, Some(next)) => {
                    self.set_prev(next, None)?;
                    self.data.head = Some(next.clone());
                }
                (Some(prev), None) => {
                    self.set_next(prev, None)?;
                    self.data.tail = Some(prev.clone());
                }
                (Some(prev), Some(next)) => {
                    self.set_next(prev, Some(next.clone()))?;
                    self.set_prev(next, Some(prev.clone()))?;
                }
                (None, None) => return Err(Error::NodeNotFound),
            }
        } else {
            self.data.head = None;
            self.data.tail = None;
        }

        remove_node(self.env, id);
        self.data.size -= 1;
        write_sorted_troves_data(self.env, &self.data);

        Ok(())
    }

    /// Moves an existing node to the position of its new ratio
    pub fn re_insert<F>(
        &mut self,
        id: &Address,
        new_nicr: i128,
        prev_id: Option<Address>,
        next_id: Option<Address>,
        nicr_of: &F,
    ) -> Result<(), Error>
    where
        F: Fn(&Address) -> Result<i128, Error>,
    {
        if !self.contains(id) {
            return Err(Error::NodeNotFound);
        }
        if new_nicr <= 0 {
            return Err(Error::InvalidNicr);
        }

        self.remove(id)?;
        self.insert(id, new_nicr, prev_id, next_id, nicr_of)
    }

    pub fn valid_insert_position<F>(
        &self,
        nicr: i128,
        prev_id: &Option<Address>,
        next_id: &Option<Address>,
        nicr_of: &F,
    ) -> Result<bool, Error>
    where
        F: Fn(&Address) -> Result<i128, Error>,
    {
        match (prev_id, next_id) {
            (None, None) => Ok(self.is_empty()),
            (None, Some(next)) => {
                Ok(self.data.head.as_ref() == Some(next) && nicr >= nicr_of(next)?)
            }
            (Some(prev), None) => {
                Ok(self.data.tail.as_ref() == Some(prev) && nicr <= nicr_of(prev)?)
            }
            (Some(prev), Some(next)) => Ok(self.next(prev).as_ref() == Some(next)
                && nicr_of(prev)? >= nicr
                && nicr >= nicr_of(next)?),
        }
    }

    /// Resolves a `(prev, next)` pair around which a node with `nicr` belongs.
    /// Hints that left the list or sit on the wrong side of `nicr` are dropped
    /// and the search falls back to the head.
    pub fn find_insert_position<F>(
        &self,
        nicr: i128,
        prev_id: Option<Address>,
        next_id: Option<Address>,
        nicr_of: &F,
    ) -> Result<(Option<Address>, Option<Address>), Error>
    where
        F: Fn(&Address) -> Result<i128, Error>,
    {
        let prev = match prev_id {
            Some(prev) if self.contains(&prev) && nicr <= nicr_of(&prev)? => Some(prev),
            _ => None,
        };
        let next = match next_id {
            Some(next) if self.contains(&next) && nicr >= nicr_of(&next)? => Some(next),
            _ => None,
        };

        match (prev, next) {
            (None, None) => match self.first() {
                Some(head) => self.descend_list(nicr, head, nicr_of),
                None => Ok((None, None)),
            },
            (None, Some(next)) => self.ascend_list(nicr, next, nicr_of),
            (Some(prev), _) => self.descend_list(nicr, prev, nicr_of),
        }
    }

    fn descend_list<F>(
        &self,
        nicr: i128,
        start: Address,
        nicr_of: &F,
    ) -> Result<(Option<Address>, Option<Address>), Error>
    where
        F: Fn(&Address) -> Result<i128, Error>,
    {
        if self.data.head.as_ref() == Some(&start) && nicr >= nicr_of(&start)? {
            return Ok((None, Some(start)));
        }

        let mut next = self.next(&start);
        let mut prev = Some(start);
        let mut steps = 0u32;

        while let Some(current) = prev.clone() {
            if self.valid_insert_position(nicr, &prev, &next, nicr_of)? {
                break;
            }

            steps += 1;
            if steps > self.max_traversal {
                return Err(Error::HintExhausted);
            }

            prev = self.next(&current);
            next = prev.as_ref().and_then(|id| self.next(id));
        }

        Ok((prev, next))
    }

    fn ascend_list<F>(
        &self,
        nicr: i128,
        start: Address,
        nicr_of: &F,
    ) -> Result<(Option<Address>, Option<Address>), Error>
    where
        F: Fn(&Address) -> Result<i128, Error>,
    {
        if self.data.tail.as_ref() == Some(&start) && nicr <= nicr_of(&start)? {
            return Ok((Some(start), None));
        }

        let mut prev = self.prev(&start);
        let mut next = Some(start);
        let mut steps = 0u32;

        while let Some(current) = next.clone() {
            if self.valid_insert_position(nicr, &prev, &next, nicr_of)? {
                break;
            }

            steps += 1;
            if steps > self.max_traversal {
                return Err(Error::HintExhausted);
            }

            next = self.prev(&current);
            prev = next.as_ref().and_then(|id| self.prev(id));
        }

        Ok((prev, next))
    }

    fn set_next(&self, id: &Address, next: Option<Address>) -> Result<(), Error> {
        let mut node = read_node(self.env, id).ok_or(Error::NodeNotFound)?;
        node.next = next;
        write_node(self.env, id, &node);
        Ok(())
    }

    fn set_prev(&self, id: &Address, prev: Option<Address>) -> Result<(), Error> {
        let mut node = read_node(self.env, id).ok_or(Error::NodeNotFound)?;
        node.prev = prev;
        write_node(self.env, id, &node);
        Ok(())
    }
}
