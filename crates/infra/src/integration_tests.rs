//! Integration tests for the full rule-engine pipeline.
//!
//! Tests: Command → ProcurementService → rules → InMemoryStore
//!
//! Verifies:
//! - Agreement ceilings and windows gate order creation and receipt
//! - Earliest received order per plant across agreement-backed and standalone orders
//! - Rejected commands leave the store untouched
//! - Concurrent writers cannot overshoot an agreement ceiling

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{Duration, NaiveDate};

    use supplyline_procurement::{
        Agreement, AgreementId, CreatePurchaseAgreement, CreatePurchaseOrder, Order, OrderId,
        OrderStatus, Plant, PlantId, ProcurementError, ReceivePurchaseOrder, Vendor, VendorId,
    };

    use crate::clock::FixedClock;
    use crate::service::ProcurementService;
    use crate::store::{InMemoryStore, RecordStore};

    type Service = ProcurementService<Arc<InMemoryStore>, FixedClock>;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn days_from_today(days: i64) -> NaiveDate {
        today() + Duration::days(days)
    }

    struct Fixture {
        service: Service,
        plant: Plant,
        vendor: Vendor,
    }

    fn setup() -> Fixture {
        let service = ProcurementService::with_clock(
            Arc::new(InMemoryStore::new()),
            FixedClock(today()),
        );
        let plant = service.register_plant("Plant A").unwrap();
        let vendor = service.register_vendor("Vendor A").unwrap();
        Fixture {
            service,
            plant,
            vendor,
        }
    }

    fn create_agreement(fx: &Fixture, start: i64, end: i64, quantity: i64) -> Agreement {
        fx.service
            .create_purchase_agreement(CreatePurchaseAgreement {
                plant_id: fx.plant.id,
                vendor_id: fx.vendor.id,
                start: days_from_today(start),
                end: days_from_today(end),
                quantity,
            })
            .unwrap()
    }

    fn order_on(fx: &Fixture, agreement: &Agreement, quantity: i64, ordered: i64) -> Order {
        fx.service
            .create_purchase_order(
                CreatePurchaseOrder::against_agreement(agreement.id, quantity)
                    .ordered_on(days_from_today(ordered)),
            )
            .unwrap()
    }

    fn receive_on(fx: &Fixture, order: &Order, delivered: i64) -> Order {
        fx.service
            .receive_purchase_order(
                ReceivePurchaseOrder::new(order.id).delivered_on(days_from_today(delivered)),
            )
            .unwrap()
    }

    fn order_count(fx: &Fixture) -> usize {
        RecordStore::<Order>::filter(fx.service.store(), &|_: &Order| true)
            .unwrap()
            .len()
    }

    #[test]
    fn order_quantities_are_capped_by_the_agreement() {
        let fx = setup();
        let agreement = create_agreement(&fx, -35, 365, 150);

        let first = order_on(&fx, &agreement, 100, -5);
        receive_on(&fx, &first, -5);

        let err = fx
            .service
            .create_purchase_order(
                CreatePurchaseOrder::against_agreement(agreement.id, 100)
                    .ordered_on(days_from_today(-10)),
            )
            .unwrap_err();
        assert_eq!(
            err,
            ProcurementError::QuantityExceedsAgreement {
                requested: 100,
                existing: 100,
                ceiling: 150,
            }
        );

        // The remaining 50 can still be ordered.
        let rest = order_on(&fx, &agreement, 50, -10);
        assert_eq!(rest.quantity, 50);
        assert_eq!(order_count(&fx), 2);
    }

    #[test]
    fn order_date_after_window_end_is_rejected() {
        let fx = setup();
        let agreement = create_agreement(&fx, 0, 365, 150);

        let err = fx
            .service
            .create_purchase_order(
                CreatePurchaseOrder::against_agreement(agreement.id, 10)
                    .ordered_on(agreement.window.end() + Duration::days(1)),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            ProcurementError::OrderDateOutsideAgreementWindow { .. }
        ));
        assert_eq!(order_count(&fx), 0);
    }

    #[test]
    fn earliest_plant_order_spans_agreements_and_standalone_orders() {
        let fx = setup();
        let agreement = create_agreement(&fx, -35, 365, 1000);

        let o1 = order_on(&fx, &agreement, 100, -5);
        receive_on(&fx, &o1, -5);
        let o2 = order_on(&fx, &agreement, 100, -10);
        receive_on(&fx, &o2, -10);
        let o3 = order_on(&fx, &agreement, 100, -2);
        receive_on(&fx, &o3, -2);

        let earliest = fx.service.get_earliest_plant_order(fx.plant.id).unwrap();
        assert_eq!(earliest.id, o2.id);

        // A standalone order delivered even earlier takes over.
        let standalone = fx
            .service
            .create_purchase_order(
                CreatePurchaseOrder::standalone(fx.vendor.id, fx.plant.id, 100)
                    .ordered_on(days_from_today(-20)),
            )
            .unwrap();
        receive_on(&fx, &standalone, -20);

        let earliest = fx.service.get_earliest_plant_order(fx.plant.id).unwrap();
        assert_eq!(earliest.id, standalone.id);
        assert!(earliest.is_standalone());
    }

    #[test]
    fn order_without_agreement_or_vendor_is_rejected() {
        let fx = setup();
        let err = fx
            .service
            .create_purchase_order(CreatePurchaseOrder {
                quantity: 10,
                order_date: None,
                agreement_id: None,
                vendor_id: None,
                plant_id: Some(fx.plant.id),
            })
            .unwrap_err();
        assert_eq!(err, ProcurementError::MissingReference);
    }

    #[test]
    fn delivery_before_order_date_is_rejected() {
        let fx = setup();
        let agreement = create_agreement(&fx, -35, 365, 150);
        let order = order_on(&fx, &agreement, 10, -5);

        let err = fx
            .service
            .receive_purchase_order(
                ReceivePurchaseOrder::new(order.id).delivered_on(days_from_today(-6)),
            )
            .unwrap_err();
        assert!(matches!(err, ProcurementError::DeliveryBeforeOrderDate { .. }));

        let unchanged = fx.service.get_purchase_order(order.id).unwrap();
        assert_eq!(unchanged.status(), OrderStatus::Ordered);
    }

    #[test]
    fn order_and_delivery_dates_respect_the_agreement_window() {
        // (order offset, delivery offset, order rejected, delivery rejected)
        let cases = [
            (0, 0, false, false),
            (0, 100, false, false),
            (0, 365, false, false),
            (0, 366, false, true),
            (-1, 1, true, false),
        ];

        for (ordered, delivered, order_rejected, delivery_rejected) in cases {
            let fx = setup();
            let agreement = create_agreement(&fx, 0, 365, 150);

            let created = fx.service.create_purchase_order(
                CreatePurchaseOrder::against_agreement(agreement.id, 100)
                    .ordered_on(days_from_today(ordered)),
            );
            if order_rejected {
                assert!(
                    matches!(
                        created,
                        Err(ProcurementError::OrderDateOutsideAgreementWindow { .. })
                    ),
                    "case ({ordered}, {delivered}) should reject the order date"
                );
                continue;
            }
            let order = created.unwrap();

            let received = fx.service.receive_purchase_order(
                ReceivePurchaseOrder::new(order.id).delivered_on(days_from_today(delivered)),
            );
            if delivery_rejected {
                assert!(
                    matches!(
                        received,
                        Err(ProcurementError::DeliveryOutsideAgreementWindow { .. })
                    ),
                    "case ({ordered}, {delivered}) should reject the delivery date"
                );
            } else {
                let received = received.unwrap();
                assert!(agreement.window.contains(received.delivery_date.unwrap()));
            }
        }
    }

    #[test]
    fn receiving_an_unknown_order_fails() {
        let fx = setup();
        let err = fx
            .service
            .receive_purchase_order(ReceivePurchaseOrder::new(OrderId::from_i64(404)))
            .unwrap_err();
        assert_eq!(err, ProcurementError::OrderNotFound(OrderId::from_i64(404)));
    }

    #[test]
    fn repeated_receipt_with_same_date_is_a_no_op() {
        let fx = setup();
        let agreement = create_agreement(&fx, -35, 365, 150);
        let order = order_on(&fx, &agreement, 10, -5);

        let first = receive_on(&fx, &order, -3);
        let version = RecordStore::<Order>::version(fx.service.store()).unwrap();

        let again = receive_on(&fx, &order, -3);
        assert_eq!(again, first);
        assert_eq!(
            RecordStore::<Order>::version(fx.service.store()).unwrap(),
            version
        );

        let err = fx
            .service
            .receive_purchase_order(
                ReceivePurchaseOrder::new(order.id).delivered_on(days_from_today(-1)),
            )
            .unwrap_err();
        assert_eq!(
            err,
            ProcurementError::OrderAlreadyReceived {
                order_id: order.id,
                received_on: days_from_today(-3),
            }
        );
    }

    #[test]
    fn vendor_must_match_the_agreement() {
        let fx = setup();
        let other_vendor = fx.service.register_vendor("Vendor B").unwrap();
        let agreement = create_agreement(&fx, -35, 365, 150);

        let mut cmd = CreatePurchaseOrder::against_agreement(agreement.id, 10);
        cmd.vendor_id = Some(other_vendor.id);
        let err = fx.service.create_purchase_order(cmd).unwrap_err();
        assert_eq!(
            err,
            ProcurementError::AgreementVendorMismatch {
                agreement_id: agreement.id,
                vendor_id: other_vendor.id,
            }
        );

        let mut cmd = CreatePurchaseOrder::against_agreement(agreement.id, 10);
        cmd.vendor_id = Some(fx.vendor.id);
        let order = fx.service.create_purchase_order(cmd).unwrap();
        assert_eq!(order.vendor_id, Some(fx.vendor.id));
        // The plant is never derived from the agreement.
        assert_eq!(order.plant_id, None);
    }

    #[test]
    fn standalone_order_requires_vendor_and_plant() {
        let fx = setup();
        let err = fx
            .service
            .create_purchase_order(CreatePurchaseOrder {
                quantity: 10,
                order_date: None,
                agreement_id: None,
                vendor_id: Some(fx.vendor.id),
                plant_id: None,
            })
            .unwrap_err();
        assert_eq!(err, ProcurementError::StandaloneReferenceIncomplete);

        let err = fx
            .service
            .create_purchase_order(CreatePurchaseOrder::standalone(
                fx.vendor.id,
                PlantId::from_i64(77),
                10,
            ))
            .unwrap_err();
        assert_eq!(err, ProcurementError::PlantNotFound(PlantId::from_i64(77)));
    }

    #[test]
    fn unknown_agreement_is_reported() {
        let fx = setup();
        let err = fx
            .service
            .create_purchase_order(CreatePurchaseOrder::against_agreement(
                AgreementId::from_i64(12),
                10,
            ))
            .unwrap_err();
        assert_eq!(err, ProcurementError::AgreementNotFound(AgreementId::from_i64(12)));

        assert!(fx
            .service
            .get_purchase_agreement(AgreementId::from_i64(12))
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn plant_without_received_orders_has_no_earliest_order() {
        let fx = setup();
        let agreement = create_agreement(&fx, -35, 365, 150);
        order_on(&fx, &agreement, 10, -5);

        let err = fx.service.get_earliest_plant_order(fx.plant.id).unwrap_err();
        assert_eq!(err, ProcurementError::PlantHasNoReceivedOrders(fx.plant.id));
    }

    #[test]
    fn earliest_order_tie_goes_to_lowest_id() {
        let fx = setup();
        let agreement = create_agreement(&fx, -35, 365, 150);

        let first = order_on(&fx, &agreement, 10, -8);
        let second = order_on(&fx, &agreement, 10, -8);
        receive_on(&fx, &second, -4);
        receive_on(&fx, &first, -4);

        let earliest = fx.service.get_earliest_plant_order(fx.plant.id).unwrap();
        assert_eq!(earliest.id, first.id);
    }

    #[test]
    fn earliest_order_ignores_other_plants() {
        let fx = setup();
        let other_plant = fx.service.register_plant("Plant B").unwrap();
        let other_agreement = fx
            .service
            .create_purchase_agreement(CreatePurchaseAgreement {
                plant_id: other_plant.id,
                vendor_id: fx.vendor.id,
                start: days_from_today(-35),
                end: days_from_today(365),
                quantity: 100,
            })
            .unwrap();

        let elsewhere = order_on(&fx, &other_agreement, 10, -30);
        receive_on(&fx, &elsewhere, -30);

        let agreement = create_agreement(&fx, -35, 365, 100);
        let here = order_on(&fx, &agreement, 10, -1);
        receive_on(&fx, &here, -1);

        assert_eq!(
            fx.service.get_earliest_plant_order(fx.plant.id).unwrap().id,
            here.id
        );
        assert_eq!(
            fx.service.get_earliest_plant_order(other_plant.id).unwrap().id,
            elsewhere.id
        );
    }

    #[test]
    fn agreement_orders_count_towards_the_agreement_plant_only() {
        let fx = setup();
        let other_plant = fx.service.register_plant("Plant B").unwrap();
        let agreement = create_agreement(&fx, -35, 365, 100);

        let mut cmd = CreatePurchaseOrder::against_agreement(agreement.id, 10)
            .ordered_on(days_from_today(-3));
        cmd.plant_id = Some(other_plant.id);
        let order = fx.service.create_purchase_order(cmd).unwrap();
        assert_eq!(order.plant_id, Some(other_plant.id));
        receive_on(&fx, &order, -2);

        assert_eq!(
            fx.service.get_earliest_plant_order(fx.plant.id).unwrap().id,
            order.id
        );
        assert_eq!(
            fx.service.get_earliest_plant_order(other_plant.id).unwrap_err(),
            ProcurementError::PlantHasNoReceivedOrders(other_plant.id)
        );
    }

    #[test]
    fn agreement_creation_validates_inputs_and_parties() {
        let fx = setup();
        let base = CreatePurchaseAgreement {
            plant_id: fx.plant.id,
            vendor_id: fx.vendor.id,
            start: days_from_today(0),
            end: days_from_today(10),
            quantity: 10,
        };

        let mut cmd = base.clone();
        cmd.plant_id = PlantId::from_i64(50);
        assert_eq!(
            fx.service.create_purchase_agreement(cmd).unwrap_err(),
            ProcurementError::PlantNotFound(PlantId::from_i64(50))
        );

        let mut cmd = base.clone();
        cmd.vendor_id = VendorId::from_i64(51);
        assert_eq!(
            fx.service.create_purchase_agreement(cmd).unwrap_err(),
            ProcurementError::VendorNotFound(VendorId::from_i64(51))
        );

        let mut cmd = base.clone();
        cmd.quantity = 0;
        assert_eq!(
            fx.service.create_purchase_agreement(cmd).unwrap_err(),
            ProcurementError::InvalidQuantity(0)
        );

        let mut cmd = base.clone();
        cmd.end = days_from_today(-1);
        assert!(matches!(
            fx.service.create_purchase_agreement(cmd),
            Err(ProcurementError::InvalidAgreementWindow { .. })
        ));

        let agreement = fx.service.create_purchase_agreement(base).unwrap();
        assert_eq!(agreement.agreement_date, today());
        assert_eq!(fx.service.get_purchase_agreement(agreement.id).unwrap(), agreement);
    }

    #[test]
    fn omitted_dates_default_to_the_clock() {
        let fx = setup();
        let agreement = create_agreement(&fx, -35, 365, 150);

        let order = fx
            .service
            .create_purchase_order(CreatePurchaseOrder::against_agreement(agreement.id, 10))
            .unwrap();
        assert_eq!(order.order_date, today());

        let received = fx
            .service
            .receive_purchase_order(ReceivePurchaseOrder::new(order.id))
            .unwrap();
        assert_eq!(received.delivery_date, Some(today()));
        assert_eq!(received.status(), OrderStatus::Received);
    }

    #[test]
    fn agreement_orders_are_listed_in_creation_order() {
        let fx = setup();
        let agreement = create_agreement(&fx, -35, 365, 150);
        let a = order_on(&fx, &agreement, 10, -3);
        fx.service
            .create_purchase_order(CreatePurchaseOrder::standalone(fx.vendor.id, fx.plant.id, 5))
            .unwrap();
        let b = order_on(&fx, &agreement, 20, -2);

        let ids: Vec<_> = fx
            .service
            .list_agreement_orders(agreement.id)
            .unwrap()
            .into_iter()
            .map(|o| o.id)
            .collect();
        assert_eq!(ids, vec![a.id, b.id]);
    }

    #[test]
    fn rejected_orders_do_not_touch_the_store() {
        let fx = setup();
        let agreement = create_agreement(&fx, -35, 365, 50);
        order_on(&fx, &agreement, 50, -1);
        let version = RecordStore::<Order>::version(fx.service.store()).unwrap();

        let _ = fx
            .service
            .create_purchase_order(CreatePurchaseOrder::against_agreement(agreement.id, 1));
        let _ = fx.service.create_purchase_order(CreatePurchaseOrder {
            quantity: -4,
            order_date: None,
            agreement_id: Some(agreement.id),
            vendor_id: None,
            plant_id: None,
        });

        assert_eq!(
            RecordStore::<Order>::version(fx.service.store()).unwrap(),
            version
        );
        assert_eq!(order_count(&fx), 1);
    }

    #[test]
    fn concurrent_orders_never_overshoot_the_ceiling() {
        let fx = setup();
        let agreement = create_agreement(&fx, -35, 365, 50);
        let service = Arc::new(fx.service);

        let handles: Vec<_> = (0..12)
            .map(|_| {
                let service = service.clone();
                let agreement_id = agreement.id;
                std::thread::spawn(move || {
                    service.create_purchase_order(CreatePurchaseOrder::against_agreement(
                        agreement_id,
                        10,
                    ))
                })
            })
            .collect();

        let mut created = 0;
        for handle in handles {
            match handle.join().unwrap() {
                Ok(_) => created += 1,
                Err(ProcurementError::QuantityExceedsAgreement { .. })
                | Err(ProcurementError::Conflict(_)) => {}
                Err(other) => panic!("unexpected error: {other:?}"),
            }
        }

        let orders = service.list_agreement_orders(agreement.id).unwrap();
        let committed: i64 = orders.iter().map(|o| o.quantity).sum();
        assert_eq!(orders.len(), created);
        assert!(committed <= agreement.quantity);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 64,
                ..ProptestConfig::default()
            })]

            /// Property: whatever sequence of orders the engine is asked to create,
            /// the quantities stored against an agreement never exceed its ceiling,
            /// and every rejection is a ceiling violation.
            #[test]
            fn engine_keeps_agreement_orders_under_the_ceiling(
                ceiling in 1i64..300,
                requests in prop::collection::vec((1i64..120, any::<bool>()), 1..25)
            ) {
                let fx = setup();
                let agreement = create_agreement(&fx, -35, 365, ceiling);
                let mut accepted = 0i64;

                for (quantity, received) in requests {
                    let result = fx.service.create_purchase_order(
                        CreatePurchaseOrder::against_agreement(agreement.id, quantity),
                    );
                    match result {
                        Ok(order) => {
                            accepted += quantity;
                            if received {
                                receive_on(&fx, &order, 0);
                            }
                        }
                        Err(ProcurementError::QuantityExceedsAgreement { existing, ceiling: c, .. }) => {
                            prop_assert_eq!(existing, accepted);
                            prop_assert_eq!(c, ceiling);
                            prop_assert!(existing + quantity > ceiling);
                        }
                        Err(other) => prop_assert!(false, "unexpected error: {:?}", other),
                    }

                    let stored: i64 = fx
                        .service
                        .list_agreement_orders(agreement.id)
                        .unwrap()
                        .iter()
                        .map(|o| o.quantity)
                        .sum();
                    prop_assert_eq!(stored, accepted);
                    prop_assert!(stored <= ceiling);
                }
            }
        }
    }
}
