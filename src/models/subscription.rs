use serde::Serialize;

/// One topic this service wants the sidecar to deliver to it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SubscriptionDescriptor {
    pub pubsubname: &'static str,
    pub topic: &'static str,
    pub route: &'static str,
}

/// Subscriptions advertised on `/dapr/subscribe`.
pub const SUBSCRIPTIONS: &[SubscriptionDescriptor] = &[SubscriptionDescriptor {
    pubsubname: "pubsub",
    topic: "messages",
    route: "/messages",
}];
