//! Common node constructors.
//!
//! Each constructor writes the new node into the given link and returns the
//! last node it created. Composite constructors put their first node into
//! the link and thread the rest through `next` slots.

use crate::builder::chain::{ChainBuilder, Link, Tail};
use crate::core::{ActionKind, ActorId, ExitHook, StateNode, Update, UpdateContext};

impl ChainBuilder {
    /// A node without any update rule. An empty name marks it as a substate.
    ///
    /// The caller must attach a rule with [`ChainBuilder::set_update`]
    /// before building.
    pub fn simple(&mut self, link: Link, duration: f32, name: &str) -> Tail {
        self.attach(link, StateNode::new(name, duration))
    }

    /// A node that is done once `duration` seconds have elapsed.
    pub fn timeout(&mut self, link: Link, duration: f32, name: &str) -> Tail {
        let tail = self.simple(link, duration, name);
        self.set_update(&tail, Update::Timeout);
        tail
    }

    /// A node driven by a caller predicate.
    pub fn custom<F>(&mut self, link: Link, duration: f32, name: &str, predicate: F) -> Tail
    where
        F: Fn(&UpdateContext<'_>) -> bool + Send + Sync + 'static,
    {
        let tail = self.simple(link, duration, name);
        self.set_update(&tail, Update::Custom(Box::new(predicate)));
        tail
    }

    /// A node that is done as soon as `actor` starts any cast.
    ///
    /// `delay` is the expected wait before the cast and only feeds
    /// estimates.
    pub fn cast_start(&mut self, link: Link, actor: ActorId, delay: f32, name: &str) -> Tail {
        let tail = self.simple(link, delay, name);
        self.set_update(&tail, Update::CastStarted(actor));
        tail
    }

    /// Like [`ChainBuilder::cast_start`], but checks the observed action on
    /// exit. Any other cast still advances the chain and is reported as a
    /// diagnostic.
    pub fn cast_start_expecting<A: ActionKind>(
        &mut self,
        link: Link,
        actor: ActorId,
        expected: A,
        delay: f32,
        name: &str,
    ) -> Tail {
        let tail = self.cast_start(link, actor, delay, name);
        self.set_exit(
            &tail,
            ExitHook::ExpectCast {
                actor,
                expected: expected.action_id(),
                label: expected.label(),
            },
        );
        tail
    }

    /// A node that is done as soon as `actor` stops casting, whether the cast
    /// completed or was interrupted.
    pub fn cast_end(&mut self, link: Link, actor: ActorId, cast_time: f32, name: &str) -> Tail {
        let tail = self.simple(link, cast_time, name);
        self.set_update(&tail, Update::CastEnded(actor));
        tail
    }

    /// Cast start (expecting `id`) followed by cast end. The cast-end node
    /// carries `name`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use phasechain::builder::ChainBuilder;
    /// use phasechain::core::ActorId;
    ///
    /// let boss = ActorId(0x400);
    /// let (mut builder, root) = ChainBuilder::new();
    /// let slam = builder.cast(root, boss, 5u32, 2.0, 3.0, "Slam");
    /// let slam_id = slam.id();
    ///
    /// let chain = builder.build().unwrap();
    /// assert_eq!(chain.len(), 2);
    /// assert!(chain.node(chain.head()).unwrap().is_substate());
    /// assert_eq!(chain.node(slam_id).unwrap().name(), "Slam");
    /// ```
    pub fn cast<A: ActionKind>(
        &mut self,
        link: Link,
        actor: ActorId,
        id: A,
        delay: f32,
        cast_time: f32,
        name: &str,
    ) -> Tail {
        let start = self.cast_start_expecting(link, actor, id, delay, "");
        self.cast_end(start.next(), actor, cast_time, name)
    }

    /// Cast start, cast end, then a `resolve` timeout that carries `name`.
    #[allow(clippy::too_many_arguments)]
    pub fn cast_with_resolve<A: ActionKind>(
        &mut self,
        link: Link,
        actor: ActorId,
        id: A,
        delay: f32,
        cast_time: f32,
        resolve: f32,
        name: &str,
    ) -> Tail {
        let start = self.cast_start_expecting(link, actor, id, delay, "");
        let end = self.cast_end(start.next(), actor, cast_time, "");
        self.timeout(end.next(), resolve, name)
    }
}
