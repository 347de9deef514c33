use hedgerow::pq::{IndexPQ, Orientation};
use hedgerow::{Error, Result};
use rand::{self, Rng};
use std::marker::PhantomData;

/// Something to perform in one round of tests
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum RoundAction {
    Insert { index: usize, key: i32 },
    ChangeKey { index: usize, key: i32 },
    IncreaseKey { index: usize, key: i32 },
    DecreaseKey { index: usize, key: i32 },
    Delete { index: usize },
    Contains { index: usize },
    Pop,
    Peek,
}

/// The result after one round
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum RoundResult {
    Done,
    Key(i32),
    Popped(usize, i32),
    Contained(bool),
    Failed(Error),
}

impl<T: Into<RoundResult>> From<Result<T>> for RoundResult {
    fn from(res: Result<T>) -> Self {
        match res {
            Ok(x) => x.into(),
            Err(e) => RoundResult::Failed(e),
        }
    }
}

impl From<()> for RoundResult {
    fn from(_: ()) -> Self {
        RoundResult::Done
    }
}

impl From<i32> for RoundResult {
    fn from(key: i32) -> Self {
        RoundResult::Key(key)
    }
}

impl From<(usize, i32)> for RoundResult {
    fn from((index, key): (usize, i32)) -> Self {
        RoundResult::Popped(index, key)
    }
}

impl From<bool> for RoundResult {
    fn from(b: bool) -> Self {
        RoundResult::Contained(b)
    }
}

/// A slow but obviously correct indexed priority queue: every index's key,
/// scanned linearly for the top.
#[derive(Clone, Debug)]
pub struct Model<O> {
    keys: Vec<Option<i32>>,
    phantom: PhantomData<O>,
}

impl<O: Orientation> Model<O> {
    pub fn new(capacity: usize) -> Self {
        Model {
            keys: vec![None; capacity],
            phantom: PhantomData,
        }
    }

    pub fn len(&self) -> usize {
        self.keys.iter().flatten().count()
    }

    fn check(&self, index: usize) -> Result<()> {
        if index >= self.keys.len() {
            return Err(Error::IndexOutOfRange {
                index,
                capacity: self.keys.len(),
            });
        }
        Ok(())
    }

    fn key(&self, index: usize) -> Result<i32> {
        self.check(index)?;
        self.keys[index].ok_or(Error::NotFound(index))
    }

    pub fn contains(&self, index: usize) -> Result<bool> {
        self.check(index)?;
        Ok(self.keys[index].is_some())
    }

    pub fn insert(&mut self, index: usize, key: i32) -> Result<()> {
        if self.contains(index)? {
            return Err(Error::DuplicateIndex(index));
        }
        self.keys[index] = Some(key);
        Ok(())
    }

    pub fn change_key(&mut self, index: usize, key: i32) -> Result<()> {
        self.key(index)?;
        self.keys[index] = Some(key);
        Ok(())
    }

    pub fn increase_key(&mut self, index: usize, key: i32) -> Result<()> {
        // strictly more extremal: greater for a max-queue, smaller for a min-queue
        if !O::above(&key, &self.key(index)?) {
            return Err(Error::InvalidKeyUpdate { index });
        }
        self.keys[index] = Some(key);
        Ok(())
    }

    pub fn decrease_key(&mut self, index: usize, key: i32) -> Result<()> {
        if !O::above(&self.key(index)?, &key) {
            return Err(Error::InvalidKeyUpdate { index });
        }
        self.keys[index] = Some(key);
        Ok(())
    }

    pub fn delete(&mut self, index: usize) -> Result<i32> {
        let key = self.key(index)?;
        self.keys[index] = None;
        Ok(key)
    }

    pub fn peek(&self) -> Result<i32> {
        self.keys
            .iter()
            .flatten()
            .copied()
            .reduce(|best, key| if O::above(&key, &best) { key } else { best })
            .ok_or(Error::Underflow)
    }

    /// Ties between equal keys may be broken either way, so the popped index is
    /// `preferred` whenever it holds a top key.
    pub fn pop(&mut self, preferred: Option<usize>) -> Result<(usize, i32)> {
        let top = self.peek()?;
        let index = preferred
            .filter(|&i| self.keys.get(i) == Some(&Some(top)))
            .or_else(|| self.keys.iter().position(|&key| key == Some(top)))
            .ok_or(Error::Underflow)?;
        self.keys[index] = None;
        Ok((index, top))
    }

    /// The keys, top first.
    pub fn sorted_keys(&self) -> Vec<i32> {
        let mut keys: Vec<i32> = self.keys.iter().flatten().copied().collect();
        keys.sort_by(|a, b| {
            if O::above(a, b) {
                std::cmp::Ordering::Less
            } else if O::above(b, a) {
                std::cmp::Ordering::Greater
            } else {
                std::cmp::Ordering::Equal
            }
        });
        keys
    }
}

/// Runs the same action on the queue and on the model, returning both results.
pub fn run_round<O: Orientation>(
    round_action: &RoundAction,
    pq: &mut IndexPQ<i32, O>,
    model: &mut Model<O>,
) -> (RoundResult, RoundResult) {
    use RoundAction::*;
    match *round_action {
        Insert { index, key } => (pq.insert(index, key).into(), model.insert(index, key).into()),
        ChangeKey { index, key } => (
            pq.change_key(index, key).into(),
            model.change_key(index, key).into(),
        ),
        IncreaseKey { index, key } => (
            pq.increase_key(index, key).into(),
            model.increase_key(index, key).into(),
        ),
        DecreaseKey { index, key } => (
            pq.decrease_key(index, key).into(),
            model.decrease_key(index, key).into(),
        ),
        Delete { index } => (pq.delete(index).into(), model.delete(index).into()),
        Contains { index } => (pq.contains(index).into(), model.contains(index).into()),
        Pop => {
            let popped = pq.pop_with_key();
            let preferred = popped.as_ref().ok().map(|&(index, _)| index);
            (popped.into(), model.pop(preferred).into())
        }
        Peek => (pq.peek().copied().into(), model.peek().into()),
    }
}

pub const CAPACITY: usize = 50;
const MAX_KEY: i32 = 100;

fn random_round_action(rng: &mut rand::prelude::ThreadRng) -> RoundAction {
    use RoundAction::*;
    // a few indices past the end, to exercise range errors
    let index = rng.gen_range(0..CAPACITY + 3);
    let key = rng.gen_range(-MAX_KEY..=MAX_KEY);
    match rng.gen_range(0..10) {
        // inserts are more frequent so that the queue stays populated
        0..=2 => Insert { index, key },
        3 => ChangeKey { index, key },
        4 => IncreaseKey { index, key },
        5 => DecreaseKey { index, key },
        6 => Delete { index },
        7 => Contains { index },
        8 => Pop,
        9 => Peek,
        _ => {
            panic!()
        }
    }
}

pub fn check_consistency<O: Orientation>(num_rounds: u32) {
    let mut rng = rand::thread_rng();
    let mut pq: IndexPQ<i32, O> = IndexPQ::new(CAPACITY);
    let mut model = Model::<O>::new(CAPACITY);

    for _ in 0..num_rounds {
        let round_action = random_round_action(&mut rng);
        let (res1, res2) = run_round(&round_action, &mut pq, &mut model);
        assert_eq!(res1, res2, "after {round_action:?}");
        assert_eq!(pq.len(), model.len());
        // `O(capacity)`, fine for a queue this small
        pq.assert_correctness();
    }

    let expected = model.sorted_keys();
    let drained: Vec<i32> = pq.drain_sorted().map(|(_, key)| key).collect();
    assert_eq!(drained, expected);
    assert!(pq.is_empty());
}
