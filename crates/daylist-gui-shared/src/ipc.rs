use serde::Serialize;
use uuid::Uuid;

/// Payload of one backend invoke.
///
/// Command parameters are matched by
/// their camelCase names, so the id
/// travels as `requestId`.
#[derive(Debug, Serialize)]
pub struct InvokeRequest<'a, A> {
  #[serde(
    skip_serializing_if = "Option::is_none"
  )]
  pub args:       Option<&'a A>,
  #[serde(rename = "requestId")]
  pub request_id: String
}

impl<'a, A> InvokeRequest<'a, A> {
  pub fn new(
    args: Option<&'a A>
  ) -> Self {
    Self {
      args,
      request_id: Uuid::new_v4()
        .to_string()
    }
  }
}

/// Numbers snapshot requests so a reply
/// that arrives after a newer request
/// was sent can be dropped.
#[derive(Debug, Default)]
pub struct RequestSequence {
  issued: u64
}

impl RequestSequence {
  pub fn issue(&mut self) -> u64 {
    self.issued += 1;
    self.issued
  }

  pub fn is_latest(
    &self,
    ticket: u64
  ) -> bool {
    ticket == self.issued
  }
}
