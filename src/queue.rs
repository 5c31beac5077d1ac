//! Destruction queues.

use crossbeam_channel as chan;

/// Maximum number of handles that may await release at once.
const MAX_QUEUE_SIZE: usize = 64;

/// Send half of a [`Queue`].
///
/// [`Queue`]: struct.Queue.html
pub type Sender<T> = chan::Sender<T>;

/// Receive half of a [`Queue`].
///
/// [`Queue`]: struct.Queue.html
pub type Receiver<T> = chan::Receiver<T>;

/// Carries the IDs of dropped handles back to the factory.
#[derive(Clone)]
pub struct Queue<T> {
    tx: Sender<T>,
    rx: Receiver<T>,
}

impl<T> Queue<T> {
    /// Constructor.
    pub fn new() -> Self {
        let (tx, rx) = chan::bounded(MAX_QUEUE_SIZE);
        Self { tx, rx }
    }

    /// Clone the send half of the queue.
    pub fn tx(&self) -> Sender<T> {
        self.tx.clone()
    }

    /// Remove the item from the front of the queue.
    pub fn next(&self) -> Option<T> {
        self.rx.try_recv().ok()
    }

    /// Remove every queued item, oldest first.
    pub fn drain(&self) -> Vec<T> {
        let mut items = Vec::new();
        while let Some(item) = self.next() {
            items.push(item);
        }
        items
    }
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_is_fifo_and_empties_the_queue() {
        let queue = Queue::new();
        let tx = queue.tx();
        tx.send(3u32).unwrap();
        tx.send(1).unwrap();
        tx.send(2).unwrap();
        assert_eq!(queue.drain(), vec![3, 1, 2]);
        assert_eq!(queue.next(), None);
    }
}
