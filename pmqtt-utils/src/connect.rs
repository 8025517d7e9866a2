use pmqtt_codec::{ConnectFrame, ConnectPayload};

use crate::client_id::{ClientId, ClientIdGenerator, Clock, Endpoint, RandomSource};

/// Copy of `original` whose payload carries `client_id`.
///
/// Headers and the remaining payload fields are taken over as they are.
pub fn with_client_id<T>(original: &ConnectFrame, client_id: T) -> ConnectFrame
where
    ClientId: From<T>,
{
    let origin = &original.payload;
    let payload = ConnectPayload {
        client_id: client_id.into(),
        will_properties: origin.will_properties.clone(),
        will_topic: origin.will_topic.clone(),
        will_message: origin.will_message.clone(),
        username: origin.username.clone(),
        password: origin.password.clone(),
    };
    ConnectFrame {
        fixed_header: original.fixed_header,
        variable_header: original.variable_header.clone(),
        payload,
    }
}

/// Gives `connect` a server generated identifier if the client did not send one.
///
/// Returns `None` when the frame already carries an identifier.
pub fn assign_client_id<C, R>(
    connect: &ConnectFrame,
    generator: &ClientIdGenerator<C, R>,
    endpoint: Option<&Endpoint>,
) -> Option<ConnectFrame>
where
    C: Clock,
    R: RandomSource,
{
    if !connect.client_id().is_empty() {
        return None;
    }
    let client_id = generator.generate(endpoint);
    log::debug!("client from {:?} connected without an identifier, assigned {}", endpoint, client_id);
    Some(with_client_id(connect, client_id))
}
