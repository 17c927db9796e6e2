use std::collections::VecDeque;

/// Handoff between state functions and [`Lexer::next_token`](crate::Lexer::next_token).
///
/// Producer and consumer run on the same thread and alternate, so at most
/// one item is normally pending. A state function that publishes twice in
/// one step gets both delivered in order.
#[derive(Debug)]
pub(crate) struct Channel<T> {
    pending: VecDeque<T>,
}

impl<T> Channel<T> {
    pub(crate) fn new() -> Self {
        Self {
            pending: VecDeque::with_capacity(1),
        }
    }

    pub(crate) fn publish(&mut self, item: T) {
        self.pending.push_back(item);
    }

    pub(crate) fn try_take(&mut self) -> Option<T> {
        self.pending.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_channel() {
        let mut ch: Channel<u8> = Channel::new();
        assert_eq!(ch.try_take(), None);
    }

    #[test]
    fn fifo_order() {
        let mut ch = Channel::new();
        ch.publish(1);
        ch.publish(2);
        assert_eq!(ch.try_take(), Some(1));
        ch.publish(3);
        assert_eq!(ch.try_take(), Some(2));
        assert_eq!(ch.try_take(), Some(3));
        assert_eq!(ch.try_take(), None);
    }
}
