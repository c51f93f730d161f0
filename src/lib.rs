pub mod configuration;

pub mod manager {
    pub mod namedobject;
    pub mod managererror;
    pub mod manager;
}

pub mod planner {
    pub mod plannererror;
    pub mod calendarday;
    pub mod streak;
    pub mod plan;
    pub mod leaveoptimizer;
}

pub mod time {
    pub mod utility;
    pub mod weekendmask;
    pub mod rangeofdates;

    pub mod recurringholiday {
        pub mod recurringholiday;
        pub mod weekendadjustment;
        pub mod fixeddateholiday;
        pub mod nthweekdayholiday;
        pub mod lastweekdayholiday;
        pub mod weekdayonorbeforeholiday;
        pub mod easterrelatedholiday;
        pub mod equinoxholiday;
    }

    pub mod calendar {
        pub mod holidaycalendar;
        pub mod simplecalendar;
        pub mod holidaycalendarmanager;
    }
}
