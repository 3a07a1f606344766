//! Boundary request describing a delivery scenario.
//!
//! A [`SolveRequest`] is what callers such as the CLI decode from JSON. It
//! carries raw latitude/longitude pairs and preparation times and is turned
//! into a validated [`DeliveryProblem`] by [`SolveRequest::to_problem`].
//! Restaurants and consumers are numbered from one in order and, when
//! unnamed, labelled `R{n}` and `C{n}`.

use thiserror::Error;

use crate::{
    ConfigError, Consumer, ConsumerId, DeliveryProblem, Location, LocationError, ProblemError,
    Restaurant, RestaurantError, RestaurantId, Speed,
};

/// Largest number of orders a request may contain.
///
/// Exhaustive search visits `(2n)!` orderings, so the bound keeps solve times
/// interactive.
pub const MAX_ORDERS: usize = 5;

const DEFAULT_AGENT_NAME: &str = "Delivery Agent";

/// A latitude/longitude pair with an optional label.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointRequest {
    /// Label shown in timelines; defaults depend on the role of the point.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub name: Option<String>,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

impl PointRequest {
    /// An unnamed point.
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            name: None,
            latitude,
            longitude,
        }
    }

    /// Attach a label.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    fn to_location(
        &self,
        default_name: String,
        role: String,
    ) -> Result<Location, SolveRequestValidationError> {
        let name = self.name.clone().unwrap_or(default_name);
        Location::new(name, self.latitude, self.longitude).map_err(|source| {
            SolveRequestValidationError::InvalidCoordinate { stop: role, source }
        })
    }
}

/// One restaurant-to-consumer order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrderRequest {
    /// Pickup point.
    pub restaurant: PointRequest,
    /// Minutes until the restaurant has the order ready.
    pub prep_time_minutes: f64,
    /// Delivery point.
    pub consumer: PointRequest,
}

/// Parameters for a solve request.
///
/// # Examples
/// ```rust
/// use dispatch_core::{OrderRequest, PointRequest, SolveRequest};
///
/// let request = SolveRequest {
///     agent: PointRequest::new(12.9279, 77.6271),
///     orders: vec![OrderRequest {
///         restaurant: PointRequest::new(12.9352, 77.6245).named("Meghana Foods"),
///         prep_time_minutes: 12.0,
///         consumer: PointRequest::new(12.9304, 77.6784),
///     }],
///     speed_kmh: None,
/// };
/// let problem = request.to_problem().expect("valid request");
/// assert_eq!(problem.order_count(), 1);
/// assert_eq!(problem.agent().name, "Delivery Agent");
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolveRequest {
    /// Where the agent starts.
    pub agent: PointRequest,
    /// Orders to pick up and deliver, between one and [`MAX_ORDERS`].
    pub orders: Vec<OrderRequest>,
    /// Average agent speed; the solver default applies when absent.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub speed_kmh: Option<f64>,
}

/// Validation failures for [`SolveRequest`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveRequestValidationError {
    /// No orders were supplied.
    #[error("at least one order is required")]
    NoOrders,
    /// More orders than [`MAX_ORDERS`] were supplied.
    #[error("{count} orders exceed the maximum of {max}")]
    TooManyOrders {
        /// Orders supplied.
        count: usize,
        /// Largest accepted count.
        max: usize,
    },
    /// A point had out-of-range coordinates.
    #[error("{stop} has invalid coordinates: {source}")]
    InvalidCoordinate {
        /// Which point was rejected, e.g. `order 2 consumer`.
        stop: String,
        /// The underlying coordinate error.
        #[source]
        source: LocationError,
    },
    /// An order's preparation time was not positive.
    #[error("order {order}: {source}")]
    InvalidPrepTime {
        /// One-based order number.
        order: u32,
        /// The underlying restaurant error.
        #[source]
        source: RestaurantError,
    },
    /// The requested speed was not positive.
    #[error(transparent)]
    InvalidSpeed(#[from] ConfigError),
    /// The assembled problem was inconsistent.
    #[error(transparent)]
    Problem(#[from] ProblemError),
}

impl SolveRequest {
    /// Validate the request, reporting the first problem found.
    pub fn validate_detailed(&self) -> Result<(), SolveRequestValidationError> {
        self.speed()?;
        self.to_problem().map(|_| ())
    }

    /// The requested speed, validated.
    pub fn speed(&self) -> Result<Option<Speed>, SolveRequestValidationError> {
        self.speed_kmh
            .map(Speed::from_kmh)
            .transpose()
            .map_err(SolveRequestValidationError::from)
    }

    /// Build the [`DeliveryProblem`] described by this request.
    pub fn to_problem(&self) -> Result<DeliveryProblem, SolveRequestValidationError> {
        match self.orders.len() {
            0 => return Err(SolveRequestValidationError::NoOrders),
            count if count > MAX_ORDERS => {
                return Err(SolveRequestValidationError::TooManyOrders {
                    count,
                    max: MAX_ORDERS,
                });
            }
            _ => {}
        }

        let agent = self
            .agent
            .to_location(DEFAULT_AGENT_NAME.to_owned(), "agent".to_owned())?;

        let mut restaurants = Vec::with_capacity(self.orders.len());
        let mut consumers = Vec::with_capacity(self.orders.len());
        for (number, order) in (1_u32..).zip(&self.orders) {
            let restaurant_location = order
                .restaurant
                .to_location(format!("R{number}"), format!("order {number} restaurant"))?;
            let consumer_location = order
                .consumer
                .to_location(format!("C{number}"), format!("order {number} consumer"))?;
            let restaurant = Restaurant::new(
                RestaurantId(number),
                restaurant_location,
                order.prep_time_minutes,
            )
            .map_err(|source| SolveRequestValidationError::InvalidPrepTime {
                order: number,
                source,
            })?;
            restaurants.push(restaurant);
            consumers.push(Consumer::new(
                ConsumerId(number),
                consumer_location,
                RestaurantId(number),
            ));
        }

        Ok(DeliveryProblem::new(agent, restaurants, consumers)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Stop;
    use rstest::{fixture, rstest};

    fn order(prep_time_minutes: f64) -> OrderRequest {
        OrderRequest {
            restaurant: PointRequest::new(12.9352, 77.6245),
            prep_time_minutes,
            consumer: PointRequest::new(12.9304, 77.6784),
        }
    }

    #[fixture]
    fn request() -> SolveRequest {
        SolveRequest {
            agent: PointRequest::new(12.9279, 77.6271),
            orders: vec![order(10.0), order(15.0)],
            speed_kmh: None,
        }
    }

    #[rstest]
    fn builds_problem_with_default_labels(request: SolveRequest) {
        let problem = request.to_problem().expect("valid request");
        let names: Vec<&str> = problem.stops().iter().map(Stop::name).collect();
        assert_eq!(names, ["R1", "R2", "C1", "C2"]);
        assert_eq!(problem.agent().name, "Delivery Agent");
        let links: Vec<(ConsumerId, RestaurantId)> = problem
            .consumers()
            .map(|consumer| (consumer.id, consumer.restaurant))
            .collect();
        assert_eq!(
            links,
            [
                (ConsumerId(1), RestaurantId(1)),
                (ConsumerId(2), RestaurantId(2)),
            ]
        );
    }

    #[rstest]
    fn keeps_supplied_labels(mut request: SolveRequest) {
        request.agent = request.agent.named("Koramangala 1st Block");
        if let Some(first) = request.orders.first_mut() {
            first.consumer = first.consumer.clone().named("HSR Layout");
        }
        let problem = request.to_problem().expect("valid request");
        assert_eq!(problem.agent().name, "Koramangala 1st Block");
        let first_consumer = problem.consumers().next().map(|c| c.location.name.as_str());
        assert_eq!(first_consumer, Some("HSR Layout"));
    }

    #[rstest]
    fn rejects_empty_orders(mut request: SolveRequest) {
        request.orders.clear();
        assert_eq!(
            request.validate_detailed(),
            Err(SolveRequestValidationError::NoOrders)
        );
    }

    #[rstest]
    fn rejects_more_than_five_orders(mut request: SolveRequest) {
        request.orders = (0..6).map(|_| order(5.0)).collect();
        assert_eq!(
            request.validate_detailed(),
            Err(SolveRequestValidationError::TooManyOrders { count: 6, max: 5 })
        );
    }

    #[rstest]
    fn accepts_exactly_five_orders(mut request: SolveRequest) {
        request.orders = (0..5).map(|_| order(5.0)).collect();
        assert!(request.validate_detailed().is_ok());
    }

    #[rstest]
    fn rejects_out_of_range_consumer(mut request: SolveRequest) {
        if let Some(second) = request.orders.get_mut(1) {
            second.consumer.latitude = 123.0;
        }
        let err = request.validate_detailed().expect_err("latitude out of range");
        match err {
            SolveRequestValidationError::InvalidCoordinate { stop, source } => {
                assert_eq!(stop, "order 2 consumer");
                assert_eq!(source, LocationError::InvalidLatitude(123.0));
            }
            other => panic!("expected InvalidCoordinate, found {other:?}"),
        }
    }

    #[rstest]
    #[case(0.0)]
    #[case(-1.0)]
    fn rejects_non_positive_prep_time(mut request: SolveRequest, #[case] minutes: f64) {
        request.orders = vec![order(minutes)];
        assert_eq!(
            request.validate_detailed(),
            Err(SolveRequestValidationError::InvalidPrepTime {
                order: 1,
                source: RestaurantError::NonPositivePrepTime(minutes),
            })
        );
    }

    #[rstest]
    #[case(Some(0.0), false)]
    #[case(Some(-10.0), false)]
    #[case(Some(25.0), true)]
    #[case(None, true)]
    fn validates_speed(mut request: SolveRequest, #[case] speed: Option<f64>, #[case] ok: bool) {
        request.speed_kmh = speed;
        assert_eq!(request.validate_detailed().is_ok(), ok);
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn decodes_minimal_json() {
        let payload = r#"{
            "agent": { "latitude": 12.9279, "longitude": 77.6271 },
            "orders": [
                {
                    "restaurant": { "name": "Truffles", "latitude": 12.9337, "longitude": 77.6143 },
                    "prep_time_minutes": 20,
                    "consumer": { "latitude": 12.9121, "longitude": 77.6446 }
                }
            ]
        }"#;
        let request: SolveRequest = serde_json::from_str(payload).expect("valid JSON");
        assert_eq!(request.speed_kmh, None);
        assert_eq!(request.orders.len(), 1);
        let problem = request.to_problem().expect("valid request");
        let names: Vec<&str> = problem.stops().iter().map(Stop::name).collect();
        assert_eq!(names, ["Truffles", "C1"]);
    }
}
